//! Plain-text broadcast wire format.
//!
//! Every frame sent to a client is one of three positional strings:
//!
//! ```text
//! Client #{id}: {body}     chat message
//! Client #{id} joined      presence event
//! Client #{id} left        presence event
//! ```
//!
//! There is no envelope, so consumers tell the forms apart by substring
//! matching. [`classify`] is the consumer-side half of the format.

const PREFIX: &str = "Client #";
const JOINED_SUFFIX: &str = " joined";
const LEFT_SUFFIX: &str = " left";

/// Format a chat message line.
pub fn chat_line(client_id: &str, body: &str) -> String {
    format!("{PREFIX}{client_id}: {body}")
}

/// Format the presence line announcing that `client_id` joined.
pub fn joined_line(client_id: &str) -> String {
    format!("{PREFIX}{client_id}{JOINED_SUFFIX}")
}

/// Format the presence line announcing that `client_id` left.
pub fn left_line(client_id: &str) -> String {
    format!("{PREFIX}{client_id}{LEFT_SUFFIX}")
}

/// Kind of presence event carried by a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Joined,
    Left,
}

/// A received line, classified from the point of view of one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireLine<'a> {
    /// A chat message sent by the observing client. Holds the body only.
    Own(&'a str),
    /// A join/leave notification.
    Presence(Presence, &'a str),
    /// Anything else: chat messages from other clients and unknown text.
    Other(&'a str),
}

/// Classify `line` as seen by the client whose id is `my_id`.
///
/// A line is the client's own message when it contains `"Client #{my_id}:"`.
/// Because ids are not unique, another client using the same id is seen
/// as "own" as well.
pub fn classify<'a>(line: &'a str, my_id: &str) -> WireLine<'a> {
    let own_marker = format!("{PREFIX}{my_id}:");
    if line.contains(&own_marker) {
        let body = line
            .strip_prefix(&own_marker)
            .map(|rest| rest.strip_prefix(' ').unwrap_or(rest))
            .unwrap_or(line);
        return WireLine::Own(body);
    }

    if line.starts_with(PREFIX) && !line.contains(": ") {
        if line.ends_with(JOINED_SUFFIX) {
            return WireLine::Presence(Presence::Joined, line);
        }
        if line.ends_with(LEFT_SUFFIX) {
            return WireLine::Presence(Presence::Left, line);
        }
    }

    WireLine::Other(line)
}
