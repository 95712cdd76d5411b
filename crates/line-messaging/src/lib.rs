//! # line-messaging
//!
//! Typed client for the LINE Messaging API.
//!
//! Outbound payloads are recursive: flex boxes nest inside boxes, carousels
//! hold bubbles, templates hold columns of actions, and narrowcast audiences
//! are AND/OR/NOT trees. Every payload is checked locally against the
//! documented limits before it is sent, and all problems are reported at once
//! with the path of the offending node.
//!
//! ## Layers
//!
//! 1. **Data model**: [`message`], [`action`], [`template`], [`imagemap`],
//!    [`flex`], [`filter`], [`rich_menu`] and the request/response types
//! 2. **Validation**: [`validate`], pure and depth-guarded
//! 3. **Endpoints**: [`client::LineClient`] over a [`transport::Transport`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use line_messaging::{LineClient, Message, SendOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = LineClient::new("channel-access-token")?;
//!     client
//!         .push("U4af4980629...", vec![Message::text("Hello")], SendOptions::with_retry_key())
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod audience;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod flex;
pub mod imagemap;
pub mod insight;
pub mod liff;
pub mod message;
pub mod narrowcast;
pub mod profile;
pub mod request;
pub mod rich_menu;
pub mod template;
pub mod transport;
pub mod validate;

// Re-export primary types
pub use action::TemplateAction;
pub use client::LineClient;
pub use config::ClientConfig;
pub use error::{LineError, LineResult};
pub use filter::{DemographicFilterObject, FilterNode, RecipientObject};
pub use flex::{FlexBox, FlexBubble, FlexCarousel, FlexComponent, FlexContainer};
pub use message::{Message, MessageNode, QuickReply};
pub use narrowcast::NarrowcastRequest;
pub use request::SendOptions;
pub use template::Template;
pub use transport::{HttpTransport, Transport};
pub use validate::{validated, validated_with, FieldError, Normalize, Validate, ValidationErrors};
