use crate::DomainError;
use std::fmt;
use std::str::FromStr;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

/// A domain name as an ordered list of ASCII labels.
///
/// The root name has no labels and displays as `"."`. Equality ignores
/// ASCII case, as DNS does.
#[derive(Debug, Clone, Default, Eq)]
pub struct DomainName {
    labels: Vec<String>,
}

impl DomainName {
    pub fn root() -> Self {
        Self { labels: Vec::new() }
    }

    /// Builds a name from labels, enforcing the label and total length limits.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();

        for label in &labels {
            check_label(label)?;
        }

        let name = Self { labels };
        let len = name.wire_len();
        if len > MAX_NAME_LEN {
            return Err(DomainError::NameTooLong { len });
        }
        Ok(name)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Encoded size: one length octet per label, the label bytes, and the
    /// terminating zero octet.
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }
}

fn check_label(label: &str) -> Result<(), DomainError> {
    if label.is_empty() {
        return Err(DomainError::InvalidDomainName("empty label".to_string()));
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(DomainError::LabelTooLong {
            label: label.to_string(),
            len: label.len(),
        });
    }
    if !label.is_ascii() {
        return Err(DomainError::InvalidDomainName(format!(
            "label '{}' is not ASCII",
            label
        )));
    }
    Ok(())
}

impl FromStr for DomainName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "." {
            return Ok(Self::root());
        }
        if trimmed.is_empty() {
            return Err(DomainError::InvalidDomainName(
                "name must not be empty".to_string(),
            ));
        }

        let without_dot = trimmed.strip_suffix('.').unwrap_or(trimmed);
        Self::from_labels(without_dot.split('.')).map_err(|e| match e {
            DomainError::InvalidDomainName(reason) => {
                DomainError::InvalidDomainName(format!("'{}': {}", s, reason))
            }
            other => other,
        })
    }
}

impl PartialEq for DomainName {
    fn eq(&self, other: &Self) -> bool {
        self.labels.len() == other.labels.len()
            && self
                .labels
                .iter()
                .zip(&other.labels)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return write!(f, ".");
        }
        write!(f, "{}", self.labels.join("."))
    }
}
