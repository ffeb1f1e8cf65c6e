use std::sync::Arc;

use tracing::{error, info};

use crate::{
    errors::Error,
    llm::{ChatMessage, ChatModel, CompletionRequest},
};

use super::{parse_records, pdf, prompt, sheet, PrescriptionRecord};

/// Turns an uploaded prescription PDF into medical-coding records.
pub struct PrescriptionExtractor {
    model: Arc<dyn ChatModel>,
    model_name: String,
}

impl PrescriptionExtractor {
    pub fn new(model: Arc<dyn ChatModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }

    pub async fn extract(&self, pdf_bytes: &[u8]) -> Result<Vec<PrescriptionRecord>, Error> {
        if pdf_bytes.is_empty() {
            return Err(Error::invalid_input("PDF file is empty"));
        }

        let text = pdf::extract_text(pdf_bytes)?;

        let request = CompletionRequest::new(
            self.model_name.as_str(),
            vec![
                ChatMessage::system(prompt::SYSTEM_PROMPT),
                ChatMessage::user(prompt::coding_prompt(&text)),
            ],
        );
        let reply = self.model.complete(request).await?;

        let records = parse_records(&reply).map_err(|e| {
            error!("model reply did not parse: {}", e);
            e
        })?;

        info!(records = records.len(), "coded prescription");
        Ok(records)
    }

    /// Runs [`Self::extract`] and renders the records as an xlsx workbook.
    pub async fn to_spreadsheet(&self, pdf_bytes: &[u8]) -> Result<Vec<u8>, Error> {
        let records = self.extract(pdf_bytes).await?;
        sheet::render(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        llm::{testing::ScriptedModel, Role},
        prescriptions::pdf::fixtures::{
            pdf_with_missing_contents, pdf_with_pages, prescription_pdf,
        },
    };

    const REPLY: &str = r#"[{"patient":"Rajesh","date":"04-Apr-2025","disease":"Fever","icd10":"R50.9","medicine":"Paracetamol","medicine_code":"N02BE01","dosage":"500mg twice a day"}]"#;

    fn extractor(model: &Arc<ScriptedModel>) -> PrescriptionExtractor {
        PrescriptionExtractor::new(model.clone(), "gpt-4")
    }

    #[tokio::test]
    async fn sends_pdf_text_to_the_coder() {
        let model = Arc::new(ScriptedModel::replying(REPLY));

        let records = extractor(&model).extract(&prescription_pdf()).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].medicine, "Paracetamol");

        let request = model.last_request().unwrap();
        assert_eq!(request.model, "gpt-4");
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[0].content, prompt::SYSTEM_PROMPT);
        assert_eq!(request.messages[1].role, Role::User);
        assert!(request.messages[1].content.contains("Paracetamol 500mg"));
    }

    #[tokio::test]
    async fn malformed_reply_is_format_error() {
        let model = Arc::new(ScriptedModel::replying("I could not read the prescription."));

        let err = extractor(&model).extract(&prescription_pdf()).await.unwrap_err();

        assert!(matches!(err, Error::UpstreamFormat(_)));
    }

    #[tokio::test]
    async fn upstream_failure_propagates() {
        let model = Arc::new(ScriptedModel::failing());

        let err = extractor(&model)
            .to_spreadsheet(&prescription_pdf())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Upstream { .. }));
    }

    #[tokio::test]
    async fn unreadable_pdf_never_reaches_the_model() {
        let model = Arc::new(ScriptedModel::replying(REPLY));

        let err = extractor(&model).extract(b"%PDF-garbage").await.unwrap_err();

        assert!(matches!(err, Error::Pdf { .. }));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn empty_upload_is_invalid_input() {
        let model = Arc::new(ScriptedModel::replying(REPLY));

        let err = extractor(&model).extract(&[]).await.unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn one_bad_page_fails_before_the_model() {
        let model = Arc::new(ScriptedModel::replying(REPLY));
        let data = pdf_with_missing_contents(&["Paracetamol 500mg twice a day"]);

        let err = extractor(&model).extract(&data).await.unwrap_err();

        assert!(matches!(err, Error::Pdf { .. }));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn blank_pdf_never_reaches_the_model() {
        let model = Arc::new(ScriptedModel::replying(REPLY));

        let err = extractor(&model)
            .extract(&pdf_with_pages(&[&[]]))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::EmptyDocument));
        assert_eq!(model.calls(), 0);
    }
}
