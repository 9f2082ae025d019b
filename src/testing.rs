//! Payload builders shared by unit tests
//!
//! Builds wire payloads in the layouts the built-in shapes describe, with
//! opaque filler in the positions the codec never reads.

use serde_json::{json, Value};

pub const DRAFT_ACTIONS: &[&str] = &["^all", "^r", "^r_bt"];
pub const SEND_ACTIONS: &[&str] = &["^all", "^pfg", "^f_bt", "^f_btns", "^f_cl", "^i", "^u"];

/// Wire format revision to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revision {
    V2022_09_09,
    V2024_03_12,
}

/// Operation slot of the thread entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Create,
    Update,
    Send,
}

/// Message record contents
#[derive(Debug, Clone)]
pub struct MessageSpec {
    pub message_id: String,
    pub subject: Option<String>,
    pub body: String,
    pub actions: Vec<String>,
    pub prior_identity: Option<String>,
    pub thread_echo: Option<String>,
}

impl MessageSpec {
    pub fn new(message_id: &str, body: &str, actions: &[&str]) -> Self {
        Self {
            message_id: message_id.to_string(),
            subject: Some("subject_111".to_string()),
            body: body.to_string(),
            actions: actions.iter().map(|s| (*s).to_string()).collect(),
            prior_identity: None,
            thread_echo: None,
        }
    }

    pub fn subject(mut self, subject: Option<&str>) -> Self {
        self.subject = subject.map(str::to_string);
        self
    }

    pub fn prior(mut self, message_id: &str) -> Self {
        self.prior_identity = Some(message_id.to_string());
        self
    }

    pub fn thread_echo(mut self, thread_id: &str) -> Self {
        self.thread_echo = Some(thread_id.to_string());
        self
    }
}

fn padded(len: usize, entries: Vec<(usize, Value)>) -> Value {
    let mut out = vec![Value::Null; len];
    for (index, value) in entries {
        out[index] = value;
    }
    Value::Array(out)
}

fn body_container(body: &str) -> Value {
    json!([null, [[0, body]], null, null, null, null, 1])
}

fn message_record(revision: Revision, msg: &MessageSpec) -> Value {
    let prior = msg
        .prior_identity
        .as_ref()
        .map_or(Value::Null, |id| json!([id, 2]));
    let echo = msg.thread_echo.as_ref().map_or(Value::Null, |t| json!(t));
    let head = vec![
        json!(msg.message_id),
        json!([1, "sender@example.com", "Sender Name"]),
        json!([[1, "rcpt@example.com"]]),
        Value::Null,
        Value::Null,
        Value::Null,
        json!(1_665_155_340_000_u64),
        msg.subject.as_ref().map_or(Value::Null, |s| json!(s)),
        body_container(&msg.body),
        Value::Null,
    ];

    match revision {
        Revision::V2022_09_09 => {
            let mut record = head;
            record.extend([
                json!(msg.actions),
                prior,
                echo,
                json!([1, ["sig-default"]]),
                json!("en"),
            ]);
            Value::Array(record)
        }
        Revision::V2024_03_12 => {
            let mut record = head;
            record.extend([
                json!(2),
                json!(msg.actions),
                prior,
                echo,
                json!([1, ["sig-default"]]),
            ]);
            json!([Value::Array(record), ["compose-client", 7]])
        }
    }
}

/// Build a compose request payload
pub fn request(revision: Revision, thread_id: &str, op: Op, msg: &MessageSpec) -> Value {
    let record = message_record(revision, msg);
    let thread_op = match op {
        Op::Update => padded(14, vec![(0, json!([0])), (1, json!([record]))]),
        Op::Create => padded(
            14,
            vec![(0, json!([0])), (2, json!([[null, null, null, null, [record]]]))],
        ),
        Op::Send => padded(14, vec![(0, json!([0])), (13, json!([record, [1, 0]]))]),
    };

    json!([
        ["compose", 3, "client-meta"],
        [[[thread_id, thread_op, 1_665_155_340_000_u64]]],
        2,
        "en"
    ])
}

/// Build a compose response payload
pub fn response(revision: Revision, thread_id: &str, message_id: &str, actions: &[&str]) -> Value {
    let saved = match revision {
        Revision::V2022_09_09 => {
            json!([message_id, 1_665_155_340_000_u64, 3, null, actions, "rev-1"])
        }
        Revision::V2024_03_12 => {
            json!([[message_id, 1_710_245_000_000_u64, 3, null, null, actions], ["meta"]])
        }
    };

    json!([
        ["ok", 1_665_155_340_123_u64],
        1,
        [[thread_id, [saved], 0]],
        "sync-token-8812"
    ])
}
