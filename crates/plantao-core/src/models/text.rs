//! Text folding for matching user-entered Portuguese names.

/// Lower-case and strip Portuguese diacritics.
pub fn fold(s: &str) -> String {
    s.chars()
        .flat_map(|c| c.to_lowercase())
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// Equal after trimming, case and accent folding.
pub fn same_text(a: &str, b: &str) -> bool {
    fold(a.trim()) == fold(b.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold() {
        assert_eq!(fold("João Conceição"), "joao conceicao");
        assert_eq!(fold("ÁREA"), "area");
        assert_eq!(fold("TATUAPÉ"), "tatuape");
    }

    #[test]
    fn test_same_text() {
        assert!(same_text("Tatuapé", " TATUAPÉ "));
        assert!(same_text("Nutrição", "NUTRICAO"));
        assert!(!same_text("Moema", "Mooca"));
    }
}
