//! Codec facade
//!
//! A [`Codec`] bundles the enabled shapes and the lifecycle classifier. It
//! is immutable once built, so one instance can serve any number of
//! threads.

use crate::config::CodecConfig;
use crate::decode::{Classifier, ComposeDecoder, PayloadDecoder, RequestDecoder, ResponseDecoder};
use crate::encode::BodyEncoder;
use crate::error::Result;
use crate::shape::{Registry, Shape};
use crate::types::{ParsedCompose, ParsedComposeRequest, ParsedComposeResponse, RawPayload};
use std::sync::LazyLock;
use tracing::debug;

/// Process-wide codec with the built-in tables
pub(crate) static DEFAULT_CODEC: LazyLock<Codec> = LazyLock::new(Codec::default);

/// Compose payload codec
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Codec {
    registry: Registry,
    classifier: Classifier,
}

impl Codec {
    /// Build a codec from configuration
    pub fn new(config: &CodecConfig) -> Result<Self> {
        config.validate()?;

        let codec = Self {
            registry: Registry::without_versions(config.disabled_shapes.as_slice()),
            classifier: Classifier::new().with_send_actions(config.extra_send_actions.iter().cloned()),
        };
        debug!(
            requests = codec.registry.request_shapes().len(),
            responses = codec.registry.response_shapes().len(),
            "Built compose codec"
        );
        Ok(codec)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Identify the shape of a payload
    pub fn match_shape(&self, raw: &RawPayload) -> Result<Shape> {
        self.registry.match_shape(raw)
    }

    /// Decode a compose request
    pub fn parse_compose_request(&self, raw: &RawPayload) -> Result<ParsedComposeRequest> {
        RequestDecoder::new(&self.registry, &self.classifier).decode(raw)
    }

    /// Decode a compose response
    pub fn parse_compose_response(&self, raw: &RawPayload) -> Result<ParsedComposeResponse> {
        ResponseDecoder::new(&self.registry, &self.classifier).decode(raw)
    }

    /// Decode a payload of either direction
    pub fn decode(&self, raw: &RawPayload) -> Result<ParsedCompose> {
        PayloadDecoder::new(&self.registry, &self.classifier).decode(raw)
    }

    /// Return a copy of a request payload with its body replaced
    pub fn replace_body(&self, raw: &RawPayload, new_body: &str) -> Result<RawPayload> {
        BodyEncoder::new(&self.registry).replace_body(raw, new_body)
    }

    /// Replace the body of an owned request payload
    pub fn replace_body_into(&self, raw: RawPayload, new_body: &str) -> Result<RawPayload> {
        BodyEncoder::new(&self.registry).replace_body_into(raw, new_body)
    }
}
