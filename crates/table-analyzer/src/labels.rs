//! Column Labels and the Classification Taxonomy

/// Joined label for a column with neither a main nor a sub classification
pub const REJECT_LABEL: &str = "reject";

/// Join a (main, sub) label pair into the single training target.
///
/// Empty strings count as absent. The parts are concatenated without a
/// separator; a pair with both parts absent becomes [`REJECT_LABEL`].
pub fn label_or_reject(main: Option<&str>, sub: Option<&str>) -> String {
    let main = main.filter(|s| !s.is_empty());
    let sub = sub.filter(|s| !s.is_empty());
    match (main, sub) {
        (None, None) => REJECT_LABEL.to_string(),
        (main, sub) => format!("{}{}", main.unwrap_or(""), sub.unwrap_or("")),
    }
}

/// Two-level classification of one column
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ColumnLabel {
    main: Option<String>,
    sub: Option<String>,
}

impl ColumnLabel {
    /// Build a label; empty strings are stored as absent
    pub fn new(main: Option<impl Into<String>>, sub: Option<impl Into<String>>) -> Self {
        let keep = |s: String| if s.is_empty() { None } else { Some(s) };
        Self {
            main: main.map(Into::into).and_then(keep),
            sub: sub.map(Into::into).and_then(keep),
        }
    }

    /// Label for a column nobody classified
    pub fn unlabeled() -> Self {
        Self::default()
    }

    pub fn main(&self) -> Option<&str> {
        self.main.as_deref()
    }

    pub fn sub(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    pub fn is_unlabeled(&self) -> bool {
        self.main.is_none() && self.sub.is_none()
    }

    /// Joined training target, see [`label_or_reject`]
    pub fn label_or_reject(&self) -> String {
        label_or_reject(self.main(), self.sub())
    }
}

const ADDRESS_SUBS: &[&str] = &[
    "fulladdr",
    "street",
    "city",
    "state",
    "zipcode",
    "housenumber",
    "streetdir",
    "streetname",
    "unit",
];

const DEFAULT_TAXONOMY: &[(&str, &[&str])] = &[
    ("mailing", ADDRESS_SUBS),
    ("situs", ADDRESS_SUBS),
    ("name", &["fullname", "first", "middle", "last", "multiname"]),
    ("phone", &[]),
    ("email", &[]),
    ("county", &["fips", "countyname"]),
    ("apn", &[]),
];

/// Main classifications and the sub classifications each one allows
#[derive(Debug, Clone)]
pub struct Taxonomy {
    mains: Vec<(String, Vec<String>)>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            mains: DEFAULT_TAXONOMY
                .iter()
                .map(|(main, subs)| {
                    (
                        main.to_string(),
                        subs.iter().map(|s| s.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

impl Taxonomy {
    /// Sub classifications allowed under `main`, `None` for an unknown main
    pub fn subclasses(&self, main: &str) -> Option<&[String]> {
        self.mains
            .iter()
            .find(|(m, _)| m == main)
            .map(|(_, subs)| subs.as_slice())
    }

    /// Whether a label pair fits the taxonomy.
    ///
    /// The unlabeled pair always fits; a sub without a main never does.
    pub fn is_known(&self, label: &ColumnLabel) -> bool {
        match (label.main(), label.sub()) {
            (None, None) => true,
            (None, Some(_)) => false,
            (Some(main), None) => self.subclasses(main).is_some(),
            (Some(main), Some(sub)) => self
                .subclasses(main)
                .is_some_and(|subs| subs.iter().any(|s| s == sub)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_or_reject() {
        assert_eq!(label_or_reject(Some(""), Some("")), "reject");
        assert_eq!(label_or_reject(None, None), "reject");
        assert_eq!(label_or_reject(Some("city"), Some("")), "city");
        assert_eq!(label_or_reject(Some("situs"), Some("zipcode")), "situszipcode");
        assert_eq!(label_or_reject(None, Some("zipcode")), "zipcode");
    }

    #[test]
    fn test_column_label_normalizes_empty_parts() {
        let label = ColumnLabel::new(Some(""), Some(""));
        assert!(label.is_unlabeled());
        assert_eq!(label, ColumnLabel::unlabeled());
        assert_eq!(label.label_or_reject(), REJECT_LABEL);

        let label = ColumnLabel::new(Some("phone"), None::<String>);
        assert_eq!(label.main(), Some("phone"));
        assert_eq!(label.sub(), None);
        assert_eq!(label.label_or_reject(), "phone");
    }

    #[test]
    fn test_taxonomy() {
        let taxonomy = Taxonomy::default();
        assert!(taxonomy.is_known(&ColumnLabel::new(Some("situs"), Some("zipcode"))));
        assert!(taxonomy.is_known(&ColumnLabel::new(Some("phone"), None::<&str>)));
        assert!(taxonomy.is_known(&ColumnLabel::unlabeled()));
        assert!(!taxonomy.is_known(&ColumnLabel::new(Some("name"), Some("zipcode"))));
        assert!(!taxonomy.is_known(&ColumnLabel::new(None::<&str>, Some("city"))));
        assert!(!taxonomy.is_known(&ColumnLabel::new(Some("vehicle"), None::<&str>)));
        assert_eq!(taxonomy.subclasses("county").map(<[String]>::len), Some(2));
    }
}
