use crate::error::GenerationError;
use crate::gemini::{DescribeGateway, PromptGateway};
use crate::models::{DescribeRequest, FieldError, PromptForm, PromptRequest};

/// Lifecycle of one submission flow. Encoding the flow as an explicit enum
/// makes illegal states unrepresentable: a submit is only accepted from
/// `Idle` or a terminal state, so overlapping in-flight requests cannot
/// happen for the same flow instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Validating,
    Submitting,
    Success { output: String },
    Error { message: String },
}

impl FlowState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowState::Success { .. } | FlowState::Error { .. })
    }

    fn accepts_submit(&self) -> bool {
        matches!(self, FlowState::Idle) || self.is_terminal()
    }
}

/// Drives the prompt-generation and image-description flows as two
/// independent state machines over injected gateways.
///
/// Guards:
/// - a submit while the same flow is `Submitting` is a no-op and places no
///   gateway call;
/// - a prompt submit while an image description is in flight is refused, so
///   the description field cannot be consumed half-written;
/// - validation failures return to `Idle` with field-level messages and never
///   reach a gateway.
#[derive(Debug)]
pub struct FormOrchestrator {
    prompt_flow: FlowState,
    describe_flow: FlowState,
    field_errors: Vec<FieldError>,
}

impl Default for FormOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl FormOrchestrator {
    pub fn new() -> Self {
        Self {
            prompt_flow: FlowState::Idle,
            describe_flow: FlowState::Idle,
            field_errors: Vec::new(),
        }
    }

    pub fn prompt_state(&self) -> &FlowState {
        &self.prompt_flow
    }

    pub fn describe_state(&self) -> &FlowState {
        &self.describe_flow
    }

    /// Field-level messages from the most recent validation run.
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// First half of a prompt submission: runs the guards and schema
    /// validation. On success the flow is left in `Submitting` and the
    /// validated request is returned for dispatch; the caller must then feed
    /// the gateway outcome to `finish_prompt`. Returns `None` when the
    /// submission was refused or validation failed (the state says which).
    pub fn begin_prompt(&mut self, form: &PromptForm) -> Option<PromptRequest> {
        if !self.prompt_flow.accepts_submit() {
            log::debug!("Prompt submit ignored in state {:?}", self.prompt_flow);
            return None;
        }
        if self.describe_flow == FlowState::Submitting {
            log::debug!("Prompt submit refused while an image description is in flight");
            return None;
        }

        self.prompt_flow = FlowState::Validating;
        self.field_errors.clear();

        match form.validate() {
            Ok(request) => {
                self.prompt_flow = FlowState::Submitting;
                Some(request)
            }
            Err(errors) => {
                log::debug!("Prompt form failed validation: {} field(s)", errors.len());
                self.field_errors = errors;
                self.prompt_flow = FlowState::Idle;
                None
            }
        }
    }

    /// Second half: records the gateway outcome. The flow always leaves
    /// `Submitting`, success or failure. An outcome arriving in any other
    /// state is stray (the flow was never begun) and is discarded.
    pub fn finish_prompt(&mut self, outcome: Result<String, GenerationError>) -> &FlowState {
        if self.prompt_flow != FlowState::Submitting {
            log::debug!("Ignoring prompt outcome in state {:?}", self.prompt_flow);
            return &self.prompt_flow;
        }
        self.prompt_flow = match outcome {
            Ok(output) => FlowState::Success { output },
            Err(error) => {
                if let Some(detail) = error.detail() {
                    log::error!("Prompt generation failed: {}", detail);
                }
                FlowState::Error {
                    message: error.to_string(),
                }
            }
        };
        &self.prompt_flow
    }

    /// Validates, dispatches, and records one prompt submission end to end.
    pub async fn submit_prompt(
        &mut self,
        form: &PromptForm,
        gateway: &dyn PromptGateway,
        user_key: Option<&str>,
    ) -> &FlowState {
        let Some(request) = self.begin_prompt(form) else {
            return &self.prompt_flow;
        };
        let outcome = gateway
            .generate(&request, user_key)
            .await
            .map(|result| result.prompt);
        self.finish_prompt(outcome)
    }

    /// First half of an image-description submission. The data URI is
    /// checked here, locally: a malformed upload moves the flow straight to
    /// `Error` without the gateway ever being called.
    pub fn begin_describe(&mut self, request: &DescribeRequest) -> bool {
        if !self.describe_flow.accepts_submit() {
            log::debug!("Describe submit ignored in state {:?}", self.describe_flow);
            return false;
        }

        self.describe_flow = FlowState::Validating;
        if let Err(error) = request.image_payload() {
            self.describe_flow = FlowState::Error {
                message: error.to_string(),
            };
            return false;
        }

        self.describe_flow = FlowState::Submitting;
        true
    }

    pub fn finish_describe(&mut self, outcome: Result<String, GenerationError>) -> &FlowState {
        if self.describe_flow != FlowState::Submitting {
            log::debug!("Ignoring describe outcome in state {:?}", self.describe_flow);
            return &self.describe_flow;
        }
        self.describe_flow = match outcome {
            Ok(output) => FlowState::Success { output },
            Err(error) => {
                if let Some(detail) = error.detail() {
                    log::error!("Image description failed: {}", detail);
                }
                FlowState::Error {
                    message: error.to_string(),
                }
            }
        };
        &self.describe_flow
    }

    /// Validates, dispatches, and records one image description end to end.
    pub async fn submit_describe(
        &mut self,
        request: &DescribeRequest,
        gateway: &dyn DescribeGateway,
        user_key: Option<&str>,
    ) -> &FlowState {
        if !self.begin_describe(request) {
            return &self.describe_flow;
        }
        let outcome = gateway
            .describe(request, user_key)
            .await
            .map(|result| result.description);
        self.finish_describe(outcome)
    }

    /// User acknowledged the prompt result or error; back to `Idle`.
    pub fn acknowledge_prompt(&mut self) {
        if self.prompt_flow.is_terminal() {
            self.prompt_flow = FlowState::Idle;
        }
    }

    pub fn acknowledge_describe(&mut self) {
        if self.describe_flow.is_terminal() {
            self.describe_flow = FlowState::Idle;
        }
    }
}
