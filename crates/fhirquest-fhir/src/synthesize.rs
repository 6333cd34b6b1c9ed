//! Deterministic synthesis of searchset bundles
//!
//! Fabricates Patient resources (and, when the request carries a
//! condition filter, one linked Condition per patient) whose shape and
//! cardinality reflect the translated search request. Everything is
//! generated fresh per call; nothing is cached or persisted.

use crate::codes::condition_code;
use crate::request::SearchRequest;
use log::debug;
use serde::{Deserialize, Serialize};

/// Result cardinality used when the request carries no `_count` filter
pub const DEFAULT_COUNT: usize = 3;

const GIVEN_NAMES: [&str; 6] = ["John", "Jane", "Robert", "Maria", "David", "Linda"];
const FAMILY_NAMES: [&str; 6] = ["Smith", "Johnson", "Williams", "Brown", "Davis", "Miller"];

/// A FHIR searchset bundle envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    #[serde(rename = "type")]
    pub bundle_type: String,
    pub total: usize,
    pub entry: Vec<BundleEntry>,
}

/// One bundle entry: a resource plus its relative URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleEntry {
    #[serde(rename = "fullUrl")]
    pub full_url: String,
    pub resource: Resource,
}

/// Either kind of synthesized resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resource {
    Patient(PatientResource),
    Condition(ConditionResource),
}

/// Synthesized patient record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientResource {
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    pub id: String,
    pub name: Vec<HumanName>,
    pub gender: String,
    #[serde(rename = "birthDate")]
    pub birth_date: String,
    /// Age derived from the birth year, mirrored into the resource for
    /// the caller's convenience
    pub age: i32,
}

/// FHIR HumanName element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanName {
    #[serde(rename = "use")]
    pub use_: String,
    pub family: String,
    pub given: Vec<String>,
}

/// Synthesized condition record linked to a patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionResource {
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    pub id: String,
    #[serde(rename = "clinicalStatus")]
    pub clinical_status: CodeableConcept,
    pub code: CodeableConcept,
    pub subject: Reference,
    #[serde(rename = "onsetDateTime")]
    pub onset_date_time: String,
}

/// FHIR CodeableConcept element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeableConcept {
    pub coding: Vec<Coding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// FHIR Coding element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coding {
    pub system: String,
    pub code: String,
    pub display: String,
}

/// FHIR Reference element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub reference: String,
}

/// Fabricate a searchset bundle satisfying the request's shape.
///
/// N patients are generated (N from `_count`, default
/// [`DEFAULT_COUNT`]); a recognized condition filter adds one linked
/// Condition per patient, interleaved after its subject. An
/// unrecognized condition keyword is silently dropped and the patients
/// are returned on their own.
pub fn synthesize(request: &SearchRequest, current_year: i32) -> Bundle {
    let n = request.count().unwrap_or(DEFAULT_COUNT);
    let cutoff = request.birth_year_cutoff();
    let code = request.condition_keyword().and_then(|keyword| {
        let row = condition_code(keyword);
        if row.is_none() {
            debug!("no code row for condition keyword '{keyword}', omitting");
        }
        row
    });

    let mut entries = Vec::with_capacity(if code.is_some() { n * 2 } else { n });
    for i in 0..n {
        let patient = make_patient(i, cutoff, current_year);
        let patient_id = patient.id.clone();
        entries.push(BundleEntry {
            full_url: format!("Patient/{patient_id}"),
            resource: Resource::Patient(patient),
        });

        if let Some(row) = code {
            let condition = make_condition(i, &patient_id, row);
            entries.push(BundleEntry {
                full_url: format!("Condition/{}", condition.id),
                resource: Resource::Condition(condition),
            });
        }
    }

    Bundle {
        resource_type: "Bundle".to_string(),
        bundle_type: "searchset".to_string(),
        total: n,
        entry: entries,
    }
}

fn make_patient(i: usize, cutoff: Option<i32>, current_year: i32) -> PatientResource {
    let given = GIVEN_NAMES[i % GIVEN_NAMES.len()];
    let family = FAMILY_NAMES[i % FAMILY_NAMES.len()];
    // Given names alternate male/female in list order, so gender and
    // name stay consistent as both cycle.
    let gender = if i % 2 == 0 { "male" } else { "female" };

    // Birth year never exceeds the cutoff, keeping every derived age at
    // or above the requested threshold.
    let birth_year = match cutoff {
        Some(year) => year - (i as i32 % 5),
        None => current_year - 30 - (i as i32 % 40),
    };
    let month = (i % 12) + 1;

    PatientResource {
        resource_type: "Patient".to_string(),
        id: format!("patient-{}", i + 1),
        name: vec![HumanName {
            use_: "official".to_string(),
            family: family.to_string(),
            given: vec![given.to_string()],
        }],
        gender: gender.to_string(),
        birth_date: format!("{birth_year}-{month:02}-15"),
        age: current_year - birth_year,
    }
}

fn make_condition(
    i: usize,
    patient_id: &str,
    row: &crate::codes::ConditionCode,
) -> ConditionResource {
    ConditionResource {
        resource_type: "Condition".to_string(),
        id: format!("condition-{patient_id}"),
        clinical_status: CodeableConcept {
            coding: vec![Coding {
                system: "http://terminology.hl7.org/CodeSystem/condition-clinical".to_string(),
                code: "active".to_string(),
                display: "Active".to_string(),
            }],
            text: None,
        },
        code: CodeableConcept {
            coding: vec![Coding {
                system: row.system.to_string(),
                code: row.code.to_string(),
                display: row.display.to_string(),
            }],
            text: Some(row.display.to_string()),
        },
        subject: Reference {
            reference: format!("Patient/{patient_id}"),
        },
        onset_date_time: format!("{}-04-01T00:00:00Z", 2018 + (i % 5)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ResourceType, SearchRequest};
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    const YEAR: i32 = 2026;

    fn request(params: &[(&str, &str)]) -> SearchRequest {
        SearchRequest {
            method: "GET",
            resource_type: ResourceType::Patient,
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<IndexMap<_, _>>(),
        }
    }

    fn patients(bundle: &Bundle) -> Vec<&PatientResource> {
        bundle
            .entry
            .iter()
            .filter_map(|e| match &e.resource {
                Resource::Patient(p) => Some(p),
                Resource::Condition(_) => None,
            })
            .collect()
    }

    fn conditions(bundle: &Bundle) -> Vec<&ConditionResource> {
        bundle
            .entry
            .iter()
            .filter_map(|e| match &e.resource {
                Resource::Condition(c) => Some(c),
                Resource::Patient(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_default_count() {
        let bundle = synthesize(&request(&[]), YEAR);
        assert_eq!(bundle.total, DEFAULT_COUNT);
        assert_eq!(patients(&bundle).len(), DEFAULT_COUNT);
        assert!(conditions(&bundle).is_empty());
    }

    #[test]
    fn test_requested_count_with_condition_pairs() {
        let bundle = synthesize(
            &request(&[
                ("_has:Condition:patient:code:text", "diabetic"),
                ("birthdate", "le1976"),
                ("_count", "5"),
            ]),
            YEAR,
        );
        assert_eq!(bundle.total, 5);
        assert_eq!(bundle.entry.len(), 10);
        assert_eq!(patients(&bundle).len(), 5);
        assert_eq!(conditions(&bundle).len(), 5);
    }

    #[test]
    fn test_interleaving_and_cross_references() {
        let bundle = synthesize(
            &request(&[("_has:Condition:patient:code:text", "cardiac")]),
            YEAR,
        );
        for pair in bundle.entry.chunks(2) {
            let Resource::Patient(patient) = &pair[0].resource else {
                panic!("expected patient first in each pair");
            };
            let Resource::Condition(condition) = &pair[1].resource else {
                panic!("expected condition after its subject");
            };
            assert_eq!(condition.id, format!("condition-{}", patient.id));
            assert_eq!(
                condition.subject.reference,
                format!("Patient/{}", patient.id)
            );
        }
    }

    #[test]
    fn test_condition_coding_and_status() {
        let bundle = synthesize(
            &request(&[("_has:Condition:patient:code:text", "diabetic")]),
            YEAR,
        );
        let condition = conditions(&bundle)[0];
        assert_eq!(condition.code.coding[0].system, "http://snomed.info/sct");
        assert_eq!(condition.code.coding[0].code, "73211009");
        assert_eq!(condition.clinical_status.coding[0].code, "active");
        assert_eq!(condition.clinical_status.coding[0].display, "Active");
    }

    #[test]
    fn test_ages_respect_threshold() {
        let bundle = synthesize(&request(&[("birthdate", "le1976"), ("_count", "6")]), YEAR);
        for patient in patients(&bundle) {
            assert!(
                patient.age >= 50,
                "patient {} aged {} below threshold",
                patient.id,
                patient.age
            );
            let birth_year: i32 = patient.birth_date[..4].parse().unwrap();
            assert!(birth_year <= 1976);
            assert_eq!(patient.age, YEAR - birth_year);
        }
    }

    #[test]
    fn test_unknown_keyword_omits_conditions() {
        let bundle = synthesize(
            &request(&[("_has:Condition:patient:code:text", "migraine")]),
            YEAR,
        );
        assert_eq!(bundle.total, DEFAULT_COUNT);
        assert!(conditions(&bundle).is_empty());
        assert_eq!(patients(&bundle).len(), DEFAULT_COUNT);
    }

    #[test]
    fn test_sequential_identifiers() {
        let bundle = synthesize(&request(&[("_count", "4")]), YEAR);
        let ids: Vec<_> = patients(&bundle).iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec!["patient-1", "patient-2", "patient-3", "patient-4"]);
    }

    #[test]
    fn test_bundle_json_envelope() {
        let bundle = synthesize(&request(&[]), YEAR);
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["resourceType"], "Bundle");
        assert_eq!(json["type"], "searchset");
        assert_eq!(json["total"], 3);
        assert_eq!(json["entry"][0]["fullUrl"], "Patient/patient-1");
        assert_eq!(json["entry"][0]["resource"]["resourceType"], "Patient");
    }

    #[test]
    fn test_gender_alternates() {
        let bundle = synthesize(&request(&[("_count", "4")]), YEAR);
        let genders: Vec<_> = patients(&bundle).iter().map(|p| p.gender.clone()).collect();
        assert_eq!(genders, vec!["male", "female", "male", "female"]);
    }
}
