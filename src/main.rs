//! Command-line record emitter.
//!
//! Writes one record through the facade, configured by the same flags a host
//! application would expose:
//!
//! ```text
//! logfacade --log-encoding json emit warn "disk almost full" used=0.93 mount=/var
//! logfacade --save-to-file --log-file logs/app.log emit info "deployed" version=1.4.2
//! logfacade --log-config logger.toml show-config
//! ```

use clap::{Parser, Subcommand};

use logfacade::cli::LogArgs;
use logfacade::context::{RequestContext, SPAN_ID, SPAN_NAME, TRACE_ID};
use logfacade::{field, Field, Level};

#[derive(Parser)]
#[command(name = "logfacade")]
#[command(about = "Emit structured log records from the command line", long_about = None)]
struct Cli {
    #[command(flatten)]
    log: LogArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one record: LEVEL MESSAGE [KEY=VALUE...]
    Emit {
        /// debug, info, warn, error, panic or fatal
        level: Level,

        message: String,

        /// Fields; values are typed as integer, float or bool when they parse
        fields: Vec<String>,

        /// X-B3-TraceId to attach as trace context
        #[arg(long)]
        trace_id: Option<String>,

        /// X-B3-SpanId to attach as trace context
        #[arg(long)]
        span_id: Option<String>,

        /// X-Span-Name to attach as trace context
        #[arg(long)]
        span_name: Option<String>,
    },
    /// Print the resolved logger configuration as TOML
    ShowConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Emit {
            level,
            message,
            fields,
            trace_id,
            span_id,
            span_name,
        } => {
            cli.log.init()?;

            let mut ctx = RequestContext::new();
            for (key, value) in [(TRACE_ID, trace_id), (SPAN_ID, span_id), (SPAN_NAME, span_name)] {
                if let Some(value) = value {
                    ctx = ctx.with_value(key, value);
                }
            }

            let fields = fields
                .iter()
                .map(|pair| parse_field(pair))
                .collect::<Result<Vec<_>, _>>()?;
            let logger = logfacade::with_context(Some(&ctx));
            match level {
                Level::Panic => logger.panic(&message, &fields),
                Level::Fatal => logger.fatal(&message, &fields),
                other => logger.log(other, &message, &fields),
            }
            logger.sync();
        }
        Commands::ShowConfig => {
            let config = cli.log.to_config()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn parse_field(pair: &str) -> Result<Field, String> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| format!("field must be KEY=VALUE, got {:?}", pair))?;
    if key.is_empty() {
        return Err(format!("field has an empty key: {:?}", pair));
    }

    Ok(if let Ok(v) = value.parse::<i64>() {
        field::int64(key, v)
    } else if let Ok(v) = value.parse::<f64>() {
        field::float64(key, v)
    } else if let Ok(v) = value.parse::<bool>() {
        field::bool(key, v)
    } else {
        field::string(key, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use logfacade::FieldValue;

    #[test]
    fn test_parse_field_types() {
        assert_eq!(parse_field("n=3").unwrap().value(), &FieldValue::Int(3));
        assert_eq!(parse_field("r=0.5").unwrap().value(), &FieldValue::Float(0.5));
        assert_eq!(parse_field("ok=true").unwrap().value(), &FieldValue::Bool(true));
        assert_eq!(
            parse_field("path=/var/log").unwrap().value(),
            &FieldValue::String("/var/log".to_string())
        );
        assert_eq!(parse_field("eq=a=b").unwrap().value(), &FieldValue::String("a=b".to_string()));
    }

    #[test]
    fn test_parse_field_errors() {
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=1").is_err());
    }
}
