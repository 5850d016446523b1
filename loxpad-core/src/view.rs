//! Output pane rendering.

use crate::message::{Message, MessageKind};

/// Timestamp format used in the output pane.
pub const TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// Render one message as an output pane line.
pub fn render_message(message: &Message) -> String {
    let time = message.occurred_at().format(TIME_FORMAT);
    let text = message.text().unwrap_or("");
    match message.kind() {
        MessageKind::Print => format!("{}  {}", time, text),
        MessageKind::Error => format!("{}  error: {}", time, text),
    }
}

/// Render messages in order.
pub fn render_log(messages: &[Message]) -> Vec<String> {
    messages.iter().map(render_message).collect()
}
