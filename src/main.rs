//! bravia-remote - drive a Bravia television from the shell
//!
//! Device address and PSK come from `config/bravia.*` or
//! `BRAVIA__DEVICE__SERVER` / `BRAVIA__DEVICE__PSK`.

use anyhow::{bail, Context};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bravia_remote::bravia::DEFAULT_API_VERSION;
use bravia_remote::config::Config;
use bravia_remote::{BraviaClient, JsonCommand};

const USAGE: &str = "usage: bravia-remote <list | send NAME | power [on|off|status|ensure] | info | versions | methods [VERSION] | reboot | call METHOD [JSON_ARG... | KEY=JSON...]>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bravia_remote=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(action) = args.first() else {
        bail!(USAGE);
    };

    let config = Config::load().context("loading device configuration")?;
    let client = BraviaClient::from_config(config.device).await?;

    match action.as_str() {
        "list" => {
            let mut names: Vec<&str> = client.command_names().collect();
            names.sort_unstable();
            for name in names {
                println!("{}", name);
            }
        }
        "send" => {
            let name = args.get(1).context(USAGE)?;
            let resp = client.send_command(name).await?;
            if !resp.is_success() {
                bail!("device answered {}: {}", resp.status, resp.body);
            }
        }
        "power" => match args.get(1).map(String::as_str).unwrap_or("status") {
            "on" => client.turn_on().await?,
            "off" => client.turn_off().await?,
            "ensure" => client.ensure_on().await?,
            "status" => println!("{}", if client.is_on().await? { "on" } else { "off" }),
            other => bail!("unknown power action: {}", other),
        },
        "info" => print_json(&client.get_system_information().await?)?,
        "versions" => print_json(&client.get_versions().await?)?,
        "methods" => {
            let version = args.get(1).map(String::as_str).unwrap_or(DEFAULT_API_VERSION);
            print_json(&client.get_method_types(version).await?)?
        }
        "reboot" => print_json(&client.request_reboot().await?)?,
        "call" => {
            let method = args.get(1).context(USAGE)?;
            let command = build_call(method, &args[2..]);
            print_json(&client.send_json_command(command).await?)?
        }
        _ => bail!(USAGE),
    }

    Ok(())
}

/// `key=value` words become named params, everything else positional.
/// Values that don't parse as JSON are sent as strings.
fn build_call(method: &str, raw_args: &[String]) -> JsonCommand {
    let mut command = JsonCommand::new(method);
    for raw in raw_args {
        match raw.split_once('=') {
            Some((key, value)) if is_param_key(key) => {
                command = command.named(key, parse_value(value));
            }
            _ => command = command.arg(parse_value(raw)),
        }
    }
    command
}

fn is_param_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn words(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_call_named() {
        let cmd = build_call("setPowerStatus", &words(&["status=true"]));
        assert_eq!(cmd.params(), vec![json!({"status": true})]);
    }

    #[test]
    fn test_build_call_positional() {
        let cmd = build_call("getMethodTypes", &words(&["\"1.0\"", "plain"]));
        assert_eq!(cmd.params(), vec![json!("1.0"), json!("plain")]);
    }

    #[test]
    fn test_build_call_json_with_equals_is_positional() {
        let cmd = build_call("x", &words(&["{\"a\":\"b=c\"}"]));
        assert_eq!(cmd.params(), vec![json!({"a": "b=c"})]);
    }

    #[test]
    fn test_build_call_positional_wins_over_named() {
        let cmd = build_call("x", &words(&["1", "status=false"]));
        assert_eq!(cmd.params(), vec![json!(1)]);
    }
}
