//! `linebot validate` and `linebot schema`: offline payload checks.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use line_messaging::imagemap::ImagemapMessage;
use line_messaging::request::BroadcastRequest;
use line_messaging::rich_menu::RichMenu;
use line_messaging::{
    validated_with, DemographicFilterObject, FlexContainer, Message, Normalize, RecipientObject, Template, Validate,
    ValidationErrors,
};
use schemars::schema::RootSchema;
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{print_errors, read_json, Context, OutputFormat};

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PayloadKind {
    /// One message object.
    Message,
    /// An array of 1 to 5 messages.
    Messages,
    /// A flex container (bubble or carousel).
    Flex,
    /// A template (buttons, confirm, carousel, image_carousel).
    Template,
    /// An imagemap message without its `type`.
    Imagemap,
    /// A rich menu definition.
    RichMenu,
    /// A narrowcast demographic filter tree.
    Demographic,
    /// A narrowcast recipient tree.
    Recipient,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// JSON file to check.
    pub file: PathBuf,

    /// What the file holds.
    #[arg(long, default_value = "message")]
    pub kind: PayloadKind,

    /// Nesting guard for boxes and filter operators (defaults to config).
    #[arg(long)]
    pub max_depth: Option<usize>,
}

#[derive(Args)]
pub struct SchemaArgs {
    #[arg(long, default_value = "message")]
    pub kind: PayloadKind,
}

type Outcome = Result<serde_json::Value, ValidationErrors>;

fn check<T>(args: &ValidateArgs, max_depth: usize) -> anyhow::Result<Outcome>
where
    T: DeserializeOwned + Validate + Normalize + Serialize,
{
    let payload: T = read_json(&args.file)?;
    match validated_with(payload, max_depth) {
        Ok(normalized) => Ok(Ok(serde_json::to_value(&normalized)?)),
        Err(errors) => Ok(Err(errors)),
    }
}

/// A bare array is checked as the `messages` of a broadcast so the count
/// limit applies.
fn check_messages(args: &ValidateArgs, max_depth: usize) -> anyhow::Result<Outcome> {
    let messages: Vec<Message> = read_json(&args.file)?;
    let request = BroadcastRequest {
        messages,
        notification_disabled: None,
    };
    match validated_with(request, max_depth) {
        Ok(normalized) => Ok(Ok(serde_json::to_value(&normalized.messages)?)),
        Err(errors) => Ok(Err(errors)),
    }
}

pub fn validate(ctx: &Context, args: ValidateArgs) -> anyhow::Result<()> {
    let max_depth = args.max_depth.unwrap_or(ctx.config.validation.max_depth);
    tracing::debug!(file = %args.file.display(), max_depth, "validating payload");

    let outcome = match args.kind {
        PayloadKind::Message => check::<Message>(&args, max_depth)?,
        PayloadKind::Messages => check_messages(&args, max_depth)?,
        PayloadKind::Flex => check::<FlexContainer>(&args, max_depth)?,
        PayloadKind::Template => check::<Template>(&args, max_depth)?,
        PayloadKind::Imagemap => check::<ImagemapMessage>(&args, max_depth)?,
        PayloadKind::RichMenu => check::<RichMenu>(&args, max_depth)?,
        PayloadKind::Demographic => check::<DemographicFilterObject>(&args, max_depth)?,
        PayloadKind::Recipient => check::<RecipientObject>(&args, max_depth)?,
    };

    match outcome {
        Ok(normalized) => {
            if ctx.output == OutputFormat::Text {
                eprintln!("  {} {} is valid", "✓".green().bold(), args.file.display());
            }
            ctx.print_json(&normalized)
        }
        Err(errors) => {
            print_errors(ctx.output, &errors)?;
            anyhow::bail!("{} failed validation", args.file.display())
        }
    }
}

fn schema_of<T: JsonSchema>() -> RootSchema {
    schema_for!(T)
}

pub fn schema(ctx: &Context, args: SchemaArgs) -> anyhow::Result<()> {
    let schema = match args.kind {
        PayloadKind::Message => schema_of::<Message>(),
        PayloadKind::Messages => schema_of::<Vec<Message>>(),
        PayloadKind::Flex => schema_of::<FlexContainer>(),
        PayloadKind::Template => schema_of::<Template>(),
        PayloadKind::Imagemap => schema_of::<ImagemapMessage>(),
        PayloadKind::RichMenu => schema_of::<RichMenu>(),
        PayloadKind::Demographic => schema_of::<DemographicFilterObject>(),
        PayloadKind::Recipient => schema_of::<RecipientObject>(),
    };
    ctx.print_json(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use line_messaging::ClientConfig;

    fn ctx() -> Context {
        Context {
            output: OutputFormat::Json,
            config: ClientConfig::default(),
        }
    }

    fn write_temp(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("linebot-{}-{name}", std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_validate_accepts_valid_message() {
        let file = write_temp("ok.json", r#"{"type": "text", "text": "hello"}"#);
        let args = ValidateArgs {
            file: file.clone(),
            kind: PayloadKind::Message,
            max_depth: None,
        };
        assert!(validate(&ctx(), args).is_ok());
        std::fs::remove_file(file).unwrap();
    }

    #[test]
    fn test_validate_fails_on_too_many_messages() {
        let one = r#"{"type": "text", "text": "hi"}"#;
        let body = format!("[{}]", vec![one; 6].join(","));
        let file = write_temp("many.json", &body);
        let outcome = check_messages(
            &ValidateArgs {
                file: file.clone(),
                kind: PayloadKind::Messages,
                max_depth: None,
            },
            8,
        )
        .unwrap();
        let errors = outcome.unwrap_err();
        assert_eq!(errors.errors[0].path.to_string(), "messages");
        std::fs::remove_file(file).unwrap();
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let file = write_temp("bad.json", r#"{"type": "hologram"}"#);
        let args = ValidateArgs {
            file: file.clone(),
            kind: PayloadKind::Message,
            max_depth: None,
        };
        assert!(validate(&ctx(), args).is_err());
        std::fs::remove_file(file).unwrap();
    }

    #[test]
    fn test_recipient_with_two_operator_lists_is_an_error() {
        let file = write_temp(
            "recipient.json",
            r#"{"type":"operator","and":[{"type":"audience","audienceGroupId":1}],"or":[]}"#,
        );
        let args = ValidateArgs {
            file: file.clone(),
            kind: PayloadKind::Recipient,
            max_depth: None,
        };
        assert!(check::<RecipientObject>(&args, 8).is_err());
        std::fs::remove_file(file).unwrap();
    }
}
