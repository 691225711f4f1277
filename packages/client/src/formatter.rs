//! Message formatting utilities for client display.

use roomcast_shared::{
    time::timestamp_to_clock_time,
    wire::{Presence, WireLine, classify},
};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format one received line for the client `my_id`.
    ///
    /// # Arguments
    ///
    /// * `line` - The raw text frame
    /// * `my_id` - This session's client id
    /// * `received_at` - Unix timestamp when the line arrived (milliseconds)
    pub fn format_line(line: &str, my_id: &str, received_at: i64) -> String {
        let clock = Self::clock(received_at);
        match classify(line, my_id) {
            WireLine::Own(body) => format!("\n[{}] (you) {}\n", clock, body),
            WireLine::Presence(Presence::Joined, text) => format!("\n[{}] + {}\n", clock, text),
            WireLine::Presence(Presence::Left, text) => format!("\n[{}] - {}\n", clock, text),
            WireLine::Other(text) => format!("\n[{}] {}\n", clock, text),
        }
    }

    /// Format the banner printed once the session is attached
    pub fn format_attached(room_name: &str, client_id: &str) -> String {
        format!(
            "\n============================================================\n\
             Room: {}\n\
             You are 'Client #{}'. Type messages and press Enter to send.\n\
             Press Ctrl+C to exit.\n\
             ============================================================\n",
            room_name, client_id
        )
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n(ignored {} bytes of binary data)\n", byte_count)
    }

    fn clock(timestamp: i64) -> String {
        timestamp_to_clock_time(timestamp).unwrap_or_else(|| "--:--:--".to_string())
    }
}
