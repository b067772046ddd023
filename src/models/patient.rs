//! Patient entity model
//!
//! A `PatientRecord` is one directory entry: identity, demographics, contact
//! data and the medical issue the patient presented with. The serialized field
//! names match the dataset file and the HTTP response body.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Contact entries of a patient. Nearly every record carries exactly one.
pub type Contacts = SmallVec<[ContactInfo; 1]>;

/// An address/phone/email triple, each part independently absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Postal address
    #[serde(default)]
    pub address: Option<String>,
    /// Phone number
    #[serde(default)]
    pub number: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
}

/// The all-absent contact used when a record has no contact entries
static EMPTY_CONTACT: ContactInfo = ContactInfo {
    address: None,
    number: None,
    email: None,
};

impl ContactInfo {
    /// Whether every part of the contact is absent
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.address.is_none() && self.number.is_none() && self.email.is_none()
    }
}

/// Core patient entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Positive, unique and stable identifier
    pub patient_id: u64,
    /// Display name
    pub patient_name: String,
    /// Age in years
    pub age: u32,
    /// Photo reference, if any
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Contact entries; the first one is canonical
    #[serde(default)]
    pub contact: Contacts,
    /// Medical issue label
    pub medical_issue: String,
}

impl PatientRecord {
    /// Create a record with no photo and no contacts
    #[must_use]
    pub fn new(
        patient_id: u64,
        patient_name: impl Into<String>,
        age: u32,
        medical_issue: impl Into<String>,
    ) -> Self {
        Self {
            patient_id,
            patient_name: patient_name.into(),
            age,
            photo_url: None,
            contact: Contacts::new(),
            medical_issue: medical_issue.into(),
        }
    }

    /// Attach a contact entry
    #[must_use]
    pub fn with_contact(mut self, contact: ContactInfo) -> Self {
        self.contact.push(contact);
        self
    }

    /// Attach a photo reference
    #[must_use]
    pub fn with_photo(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }

    /// The canonical contact: the first entry, or the all-absent sentinel
    #[must_use]
    pub fn primary_contact(&self) -> &ContactInfo {
        self.contact.first().unwrap_or(&EMPTY_CONTACT)
    }
}
