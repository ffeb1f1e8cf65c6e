use derive_new::new;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::FormatError;

/// One medical-coding entry produced by the model.
///
/// Field names on the wire follow the sample format given in the prompt.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq, new)]
#[serde(from = "RawRecord")]
pub struct PrescriptionRecord {
    pub patient: Option<String>,
    pub date: Option<String>,
    pub disease: String,
    #[serde(rename = "icd10")]
    pub icd10_code: String,
    pub medicine: String,
    pub medicine_code: String,
    pub dosage: String,
}

/// Reply shape as the model may write it: either spelling of the code
/// fields, in any combination.
#[derive(Deserialize)]
struct RawRecord {
    #[serde(default, deserialize_with = "optional_text")]
    patient: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    date: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    disease: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    icd10: Option<String>,
    #[serde(rename = "icd10Code", default, deserialize_with = "optional_text")]
    icd10_code: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    medicine: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    medicine_code: Option<String>,
    #[serde(rename = "medicineCode", default, deserialize_with = "optional_text")]
    medicine_code_camel: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    dosage: Option<String>,
}

fn first_filled(values: [Option<String>; 2]) -> String {
    values
        .into_iter()
        .flatten()
        .find(|v| !v.is_empty())
        .unwrap_or_default()
}

impl From<RawRecord> for PrescriptionRecord {
    fn from(raw: RawRecord) -> Self {
        Self {
            patient: raw.patient,
            date: raw.date,
            disease: raw.disease.unwrap_or_default(),
            icd10_code: first_filled([raw.icd10, raw.icd10_code]),
            medicine: raw.medicine.unwrap_or_default(),
            medicine_code: first_filled([raw.medicine_code, raw.medicine_code_camel]),
            dosage: raw.dosage.unwrap_or_default(),
        }
    }
}

impl PrescriptionRecord {
    /// Cell values in spreadsheet column order.
    pub fn cells(&self) -> [&str; 7] {
        [
            self.patient.as_deref().unwrap_or_default(),
            self.date.as_deref().unwrap_or_default(),
            &self.disease,
            &self.icd10_code,
            &self.medicine,
            &self.medicine_code,
            &self.dosage,
        ]
    }
}

/// Parses a model reply as a JSON array of records.
///
/// Surrounding whitespace is ignored; anything else that is not an array of
/// objects is a [`FormatError`].
pub fn parse_records(reply: &str) -> Result<Vec<PrescriptionRecord>, FormatError> {
    Ok(serde_json::from_str(reply.trim())?)
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}
