//! Domain identifier types with validation
//!
//! This module provides newtype wrappers for the identifiers that cross
//! table boundaries: facility, patient, drug, supplier, visit and order ids.
//! Each type carries its fixed prefix and zero-padded sequence format, so a
//! drug id can never be handed to a lookup that expects a facility id.
//! Terminal identifiers that nothing downstream references (dispense,
//! transaction, procurement) stay plain strings formatted by their
//! generators.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Validates a prefixed, zero-padded identifier such as `FAC0007`
fn check_format(value: &str, prefix: &str, min_digits: usize) -> Result<(), String> {
    let digits = match value.strip_prefix(prefix) {
        Some(rest) => rest,
        None => {
            return Err(format!(
                "Identifier '{value}' does not start with '{prefix}'"
            ))
        }
    };
    if digits.len() < min_digits || digits.is_empty() {
        return Err(format!(
            "Identifier '{value}' must have at least {min_digits} digits after '{prefix}'"
        ));
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("Identifier '{value}' contains non-digit characters"));
    }
    Ok(())
}

/// Facility identifier newtype wrapper
///
/// Format: `FAC` + zero-padded sequence, e.g. `FAC0007`.
///
/// # Examples
///
/// ```
/// use karoo::domain::ids::FacilityId;
///
/// let id = FacilityId::from_seq(7);
/// assert_eq!(id.as_str(), "FAC0007");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FacilityId(String);

impl FacilityId {
    /// Creates a FacilityId from a sequence number
    pub fn from_seq(seq: u32) -> Self {
        Self(format!("FAC{seq:04}"))
    }

    /// Creates a FacilityId from an existing string, validating its format
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not `FAC` followed by digits
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        check_format(&id, "FAC", 4)?;
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FacilityId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for FacilityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Pseudonymous patient identifier
///
/// Twelve uppercase hex characters derived one-way from a salt and a
/// generation index. The same (salt, index) pair always produces the same
/// id; the index cannot be recovered from the id.
///
/// # Examples
///
/// ```
/// use karoo::domain::ids::PatientId;
///
/// let a = PatientId::derive("patient", 1);
/// let b = PatientId::derive("patient", 1);
/// assert_eq!(a, b);
/// assert_eq!(a.as_str().len(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatientId(String);

impl PatientId {
    /// Derives a pseudonymous id from a salt and a sequence index
    pub fn derive(salt: &str, index: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(format!("{salt}_{index}").as_bytes());
        let digest = hasher.finalize();
        let hex: String = digest.iter().map(|b| format!("{b:02X}")).collect();
        Self(hex[..12].to_string())
    }

    /// Creates a PatientId from an existing string, validating its format
    ///
    /// # Errors
    ///
    /// Returns an error unless the value is exactly 12 uppercase hex chars
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.len() != 12 {
            return Err(format!("Patient id '{id}' must be 12 characters"));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        {
            return Err(format!(
                "Patient id '{id}' must be uppercase hexadecimal"
            ));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Drug identifier newtype wrapper
///
/// Format: `DRUG` + zero-padded sequence, e.g. `DRUG0031`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DrugId(String);

impl DrugId {
    /// Creates a DrugId from a 1-based sequence number
    pub fn from_seq(seq: u32) -> Self {
        Self(format!("DRUG{seq:04}"))
    }

    /// Creates a DrugId from an existing string, validating its format
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not `DRUG` followed by digits
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        check_format(&id, "DRUG", 4)?;
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DrugId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DrugId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DrugId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Supplier identifier newtype wrapper
///
/// Format: `SUP` + zero-padded sequence, e.g. `SUP003`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SupplierId(String);

impl SupplierId {
    /// Creates a SupplierId from a 1-based sequence number
    pub fn from_seq(seq: u32) -> Self {
        Self(format!("SUP{seq:03}"))
    }

    /// Creates a SupplierId from an existing string, validating its format
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not `SUP` followed by digits
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        check_format(&id, "SUP", 3)?;
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SupplierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SupplierId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SupplierId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Visit identifier newtype wrapper
///
/// Format: `VISIT` + zero-padded sequence, e.g. `VISIT0000042`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisitId(String);

impl VisitId {
    /// Creates a VisitId from a 1-based sequence number
    pub fn from_seq(seq: u64) -> Self {
        Self(format!("VISIT{seq:07}"))
    }

    /// Creates a VisitId from an existing string, validating its format
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not `VISIT` followed by digits
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        check_format(&id, "VISIT", 7)?;
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for VisitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VisitId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for VisitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Medication order identifier newtype wrapper
///
/// Format: `ORD` + zero-padded sequence, e.g. `ORD00000314`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    /// Creates an OrderId from a 1-based sequence number
    pub fn from_seq(seq: u64) -> Self {
        Self(format!("ORD{seq:08}"))
    }

    /// Creates an OrderId from an existing string, validating its format
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not `ORD` followed by digits
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        check_format(&id, "ORD", 8)?;
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
