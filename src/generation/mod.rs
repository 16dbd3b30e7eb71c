//! Plan generation client.
//!
//! [`PlanGenerator`] turns an analytics snapshot into a validated
//! [`StudyPlan`] with exactly one model invocation per call:
//! serialize the snapshot and instructions, submit, extract the JSON
//! payload, and run it through the schema gate. No retries and no
//! persistence; retry policy and storage belong to the caller.

use serde_json::Value;

use crate::analytics::AnalyticsSnapshot;
use crate::error::{GenerationError, PlanError};
use crate::plan::{SchemaConfig, StudyPlan};
use crate::prompts::study_plan_prompt;
use crate::traits::{CompletionConfig, Message, ModelClient};

/// Sampling temperature for structured plan output.
const PLAN_TEMPERATURE: f32 = 0.3;

/// Generates study plans through a [`ModelClient`].
pub struct PlanGenerator<C>
where
    C: ModelClient,
{
    client: C,
    schema: SchemaConfig,
    max_tokens: u32,
}

impl<C> PlanGenerator<C>
where
    C: ModelClient,
{
    /// Create a new generator with the standard schema configuration.
    #[must_use]
    pub fn new(client: C, max_tokens: u32) -> Self {
        Self {
            client,
            schema: SchemaConfig::new(),
            max_tokens,
        }
    }

    /// Replace the schema configuration (e.g. an alternate slot grid).
    #[must_use]
    pub fn with_schema(mut self, schema: SchemaConfig) -> Self {
        self.schema = schema;
        self
    }

    /// Generate one validated plan for the student.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Generation`] if the request is invalid or the
    /// model call fails, and [`PlanError::Schema`] if the response does
    /// not conform to the plan contract. No other variant is produced
    /// here.
    pub async fn generate(
        &self,
        student_id: &str,
        snapshot: &AnalyticsSnapshot,
    ) -> Result<StudyPlan, PlanError> {
        if student_id.is_empty() {
            return Err(GenerationError::InvalidRequest {
                message: "student_id must not be empty".to_string(),
            }
            .into());
        }

        let request = build_request(student_id, snapshot)?;
        let config = CompletionConfig::new()
            .with_max_tokens(self.max_tokens)
            .with_temperature(PLAN_TEMPERATURE);

        tracing::debug!(student_id, "Submitting plan generation request");
        let response = self
            .client
            .complete(vec![Message::user(request)], config)
            .await?;

        tracing::debug!(
            student_id,
            tokens = response.usage.total(),
            "Plan generation response received"
        );

        let json = extract_json(&response.content)?;
        let plan = self.schema.validate(&json)?;

        tracing::info!(
            student_id,
            lessons = plan.suggested_lessons.len(),
            quizzes = plan.suggested_quizzes.len(),
            has_timetable = plan.study_timetable.is_some(),
            "Generated study plan"
        );

        Ok(plan)
    }
}

/// Assemble the full request text: instructions, student data, and the
/// JSON schema the response must satisfy.
fn build_request(
    student_id: &str,
    snapshot: &AnalyticsSnapshot,
) -> Result<String, GenerationError> {
    let data = serde_json::to_string_pretty(snapshot).map_err(|e| {
        GenerationError::InvalidRequest {
            message: format!("Failed to serialize snapshot: {e}"),
        }
    })?;

    let output_schema = serde_json::to_string(&schemars::schema_for!(StudyPlan)).map_err(|e| {
        GenerationError::InvalidRequest {
            message: format!("Failed to serialize output schema: {e}"),
        }
    })?;

    Ok(format!(
        "{prompt}\n\n**Input Data:**\n\n- **Student ID:** {student_id}\n- **Available Lessons:** {lessons}\n- **Student Data (JSON):**\n```json\n{data}\n```\n\n**Output JSON Schema:**\n```json\n{output_schema}\n```\n",
        prompt = study_plan_prompt(),
        lessons = snapshot.available_lesson_titles.join(", "),
    ))
}

/// Extract JSON from model output, handling code blocks.
fn extract_json(text: &str) -> Result<Value, GenerationError> {
    // Fast path: try raw JSON parse
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }

    // Fallback: extract from ```json code blocks
    if let Some(start) = text.find("```json") {
        let start = start + 7;
        if let Some(end) = text[start..].find("```") {
            let json_str = text[start..start + end].trim();
            if let Ok(value) = serde_json::from_str(json_str) {
                return Ok(value);
            }
        }
    }

    // Try plain ``` blocks
    if let Some(start) = text.find("```") {
        let start = start + 3;
        // Skip language identifier if present
        let start = text[start..].find('\n').map_or(start, |n| start + n + 1);
        if let Some(end) = text[start..].find("```") {
            let json_str = text[start..start + end].trim();
            if let Ok(value) = serde_json::from_str(json_str) {
                return Ok(value);
            }
        }
    }

    Err(GenerationError::UnexpectedResponse {
        message: "No JSON object found in model output".to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::SchemaViolation;
    use crate::test_utils::{sample_snapshot, valid_plan_json};
    use crate::traits::{CompletionResponse, MockModelClient, Usage};
    use serde_json::json;

    fn generator_returning(content: String) -> PlanGenerator<MockModelClient> {
        let mut client = MockModelClient::new();
        client
            .expect_complete()
            .times(1)
            .returning(move |_msgs, _config| {
                Ok(CompletionResponse::new(content.clone(), Usage::new(500, 900)))
            });
        PlanGenerator::new(client, 8192)
    }

    #[tokio::test]
    async fn test_generate_success_raw_json() {
        let generator = generator_returning(valid_plan_json().to_string());
        let plan = generator
            .generate("S1", &sample_snapshot())
            .await
            .expect("plan");
        assert_eq!(plan.performance_projection.len(), 6);
    }

    #[tokio::test]
    async fn test_generate_success_fenced_json() {
        let content = format!("Here is your plan:\n```json\n{}\n```\nGood luck!", valid_plan_json());
        let generator = generator_returning(content);
        let plan = generator
            .generate("S1", &sample_snapshot())
            .await
            .expect("plan");
        assert!(plan.study_timetable.is_some());
    }

    #[tokio::test]
    async fn test_generate_empty_student_id() {
        let mut client = MockModelClient::new();
        client.expect_complete().never();
        let generator = PlanGenerator::new(client, 8192);

        let err = generator
            .generate("", &sample_snapshot())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PlanError::Generation(GenerationError::InvalidRequest { .. })
        ));
    }

    #[tokio::test]
    async fn test_generate_no_json_in_response() {
        let generator = generator_returning("I could not produce a plan today.".to_string());
        let err = generator
            .generate("S1", &sample_snapshot())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PlanError::Generation(GenerationError::UnexpectedResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_generate_schema_violation_not_swallowed() {
        let mut bad = valid_plan_json();
        bad["performance_projection"].as_array_mut().unwrap().pop();
        let generator = generator_returning(bad.to_string());

        let err = generator
            .generate("S1", &sample_snapshot())
            .await
            .unwrap_err();
        match err {
            PlanError::Schema(SchemaViolation::WrongCardinality { path, .. }) => {
                assert_eq!(path, "performance_projection");
            }
            other => panic!("Wrong error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_model_failure_propagates() {
        let mut client = MockModelClient::new();
        client
            .expect_complete()
            .times(1)
            .returning(|_msgs, _config| Err(GenerationError::Timeout { timeout_ms: 60_000 }));
        let generator = PlanGenerator::new(client, 8192);

        let err = generator
            .generate("S1", &sample_snapshot())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PlanError::Generation(GenerationError::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn test_request_carries_data_and_schema() {
        let mut client = MockModelClient::new();
        client
            .expect_complete()
            .times(1)
            .withf(|messages, config| {
                let content = &messages[0].content;
                content.contains("AI learning coach")
                    && content.contains("Algebra Basics, The Solar System, Photosynthesis")
                    && content.contains("\"today_study_minutes\": 35")
                    && content.contains("performance_projection")
                    && config.max_tokens == Some(4096)
            })
            .returning(|_msgs, _config| {
                Ok(CompletionResponse::new(
                    valid_plan_json().to_string(),
                    Usage::new(1, 1),
                ))
            });

        let generator = PlanGenerator::new(client, 4096);
        generator
            .generate("S1", &sample_snapshot())
            .await
            .expect("plan");
    }

    #[test]
    fn test_extract_json_raw() {
        let value = extract_json(r#"{"key": "value"}"#).unwrap();
        assert_eq!(value["key"], json!("value"));
    }

    #[test]
    fn test_extract_json_plain_code_block() {
        let value = extract_json("Result:\n```\n{\"value\": 123}\n```").unwrap();
        assert_eq!(value["value"], json!(123));
    }

    #[test]
    fn test_extract_json_none_found() {
        let err = extract_json("just prose").unwrap_err();
        assert!(matches!(err, GenerationError::UnexpectedResponse { .. }));
    }
}
