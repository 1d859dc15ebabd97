//! IRCC (legacy SOAP remote-control) request body and headers

/// Must be sent with the surrounding double quotes; the device rejects it otherwise.
pub const SOAP_ACTION: &str = "\"urn:schemas-sony-com:service:IRCC:1#X_SendIRCC\"";

pub const CONTENT_TYPE: &str = "text/xml; charset=UTF-8";

const ENVELOPE_HEAD: &str = r#"<?xml version="1.0"?>
<s:Envelope
    xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"
    s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
  <s:Body>
    <u:X_SendIRCC
        xmlns:u="urn:schemas-sony-com:service:IRCC:1">
      <IRCCCode>"#;

const ENVELOPE_TAIL: &str = r#"</IRCCCode>
    </u:X_SendIRCC>
  </s:Body>
</s:Envelope>"#;

/// Render the SOAP envelope for one command code
pub fn envelope(code: &str) -> String {
    let mut body = String::with_capacity(ENVELOPE_HEAD.len() + code.len() + ENVELOPE_TAIL.len());
    body.push_str(ENVELOPE_HEAD);
    body.push_str(code);
    body.push_str(ENVELOPE_TAIL);
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_embeds_code() {
        let xml = envelope("AAAAAQAAAAEAAAAVAw==");
        assert!(xml.contains("<IRCCCode>AAAAAQAAAAEAAAAVAw==</IRCCCode>"));
        assert!(xml.starts_with("<?xml version=\"1.0\"?>"));
        assert!(xml.ends_with("</s:Envelope>"));
        assert_eq!(xml.matches("<IRCCCode>").count(), 1);
    }

    #[test]
    fn test_soap_action_is_quoted() {
        assert!(SOAP_ACTION.starts_with('"'));
        assert!(SOAP_ACTION.ends_with('"'));
        assert_eq!(
            SOAP_ACTION.trim_matches('"'),
            "urn:schemas-sony-com:service:IRCC:1#X_SendIRCC"
        );
    }
}
