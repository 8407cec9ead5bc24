use super::{Denuncia, DenunciaType};

/// How a filter value is compared against a stored field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    /// Case-insensitive substring
    Substring,
}

/// Fields a listing may be filtered on. Every other key is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Tipo,
    Descricao,
    Endereco,
    Latitude,
    Longitude,
}

impl FilterField {
    pub const ALLOWED: [FilterField; 5] = [
        FilterField::Tipo,
        FilterField::Descricao,
        FilterField::Endereco,
        FilterField::Latitude,
        FilterField::Longitude,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FilterField::Tipo => "tipo",
            FilterField::Descricao => "descricao",
            FilterField::Endereco => "endereco",
            FilterField::Latitude => "latitude",
            FilterField::Longitude => "longitude",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALLOWED.into_iter().find(|f| f.key() == key)
    }

    /// Column name in the `denuncias` table
    pub fn column(&self) -> &'static str {
        self.key()
    }

    pub fn match_mode(&self) -> MatchMode {
        match self {
            FilterField::Descricao | FilterField::Endereco => MatchMode::Substring,
            FilterField::Tipo | FilterField::Latitude | FilterField::Longitude => MatchMode::Exact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub field: FilterField,
    pub value: String,
}

/// Listing filter built from untrusted key/value input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DenunciaFilter {
    conditions: Vec<FilterCondition>,
}

impl DenunciaFilter {
    /// Keep allow-listed keys only. A repeated key keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut conditions: Vec<FilterCondition> = Vec::new();

        for (key, value) in pairs {
            let Some(field) = FilterField::from_key(key.as_ref()) else {
                tracing::debug!("Ignoring filter on non-filterable field '{}'", key.as_ref());
                continue;
            };
            let value = normalize_value(field, value.into());

            match conditions.iter_mut().find(|c| c.field == field) {
                Some(existing) => existing.value = value,
                None => conditions.push(FilterCondition { field, value }),
            }
        }

        Self { conditions }
    }

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, denuncia: &Denuncia) -> bool {
        self.conditions.iter().all(|c| c.matches(denuncia))
    }
}

impl FilterCondition {
    fn field_value<'a>(&self, denuncia: &'a Denuncia) -> Option<&'a str> {
        match self.field {
            FilterField::Tipo => Some(denuncia.tipo.as_str()),
            FilterField::Descricao => Some(denuncia.descricao.as_str()),
            FilterField::Endereco => denuncia.endereco.as_deref(),
            FilterField::Latitude => Some(denuncia.latitude.as_str()),
            FilterField::Longitude => Some(denuncia.longitude.as_str()),
        }
    }

    pub fn matches(&self, denuncia: &Denuncia) -> bool {
        let Some(actual) = self.field_value(denuncia) else {
            return false;
        };

        match self.field.match_mode() {
            MatchMode::Exact => actual == self.value,
            MatchMode::Substring => actual
                .to_lowercase()
                .contains(&self.value.to_lowercase()),
        }
    }
}

/// Category filters accept the same aliases as intake
fn normalize_value(field: FilterField, value: String) -> String {
    match field {
        FilterField::Tipo => value
            .parse::<DenunciaType>()
            .map(|t| t.as_str().to_string())
            .unwrap_or(value),
        _ => value,
    }
}

/// Escape LIKE metacharacters and wrap the value for a substring match
pub fn like_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::sample_denuncia;

    #[test]
    fn test_unlisted_fields_are_ignored() {
        let filter = DenunciaFilter::from_pairs([
            ("status", "resolvido"),
            ("_id", "abc"),
            ("imageBase64", "xyz"),
        ]);
        assert!(filter.is_empty());
        assert!(filter.matches(&sample_denuncia("anything here", None)));
    }

    #[test]
    fn test_text_fields_match_case_insensitive_substring() {
        let denuncia = sample_denuncia("Poste apagado na esquina", Some("Centro, Rua A"));

        assert!(DenunciaFilter::from_pairs([("descricao", "APAGADO")]).matches(&denuncia));
        assert!(DenunciaFilter::from_pairs([("endereco", "rua a")]).matches(&denuncia));
        assert!(!DenunciaFilter::from_pairs([("endereco", "Bairro")]).matches(&denuncia));
    }

    #[test]
    fn test_missing_address_never_matches_address_filter() {
        let denuncia = sample_denuncia("Poste apagado na esquina", None);
        assert!(!DenunciaFilter::from_pairs([("endereco", "")]).matches(&denuncia));
    }

    #[test]
    fn test_exact_fields_need_full_equality() {
        let denuncia = sample_denuncia("Poste apagado na esquina", None);

        assert!(DenunciaFilter::from_pairs([("latitude", denuncia.latitude.as_str())])
            .matches(&denuncia));
        assert!(!DenunciaFilter::from_pairs([("latitude", "-23.55")]).matches(&denuncia));
        assert!(DenunciaFilter::from_pairs([("tipo", "iluminacao")]).matches(&denuncia));
        assert!(DenunciaFilter::from_pairs([("tipo", "poor-lighting")]).matches(&denuncia));
        assert!(!DenunciaFilter::from_pairs([("tipo", "ilumin")]).matches(&denuncia));
    }

    #[test]
    fn test_repeated_key_keeps_last_value() {
        let filter = DenunciaFilter::from_pairs([("descricao", "a"), ("descricao", "b")]);
        assert_eq!(filter.conditions().len(), 1);
        assert_eq!(filter.conditions()[0].value, "b");
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("rua"), "%rua%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
