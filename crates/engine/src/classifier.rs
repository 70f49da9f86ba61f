//! Lexical domain classifier — the domain gate.
//!
//! Decides whether a question is in-scope by testing whether any stem
//! of a fixed bilingual lexicon appears as a literal substring of the
//! lowercased question. Substring matching (not whole-word) is
//! intentional: a stem like "contamin" catches inflected forms in both
//! Spanish and English without stemming or NLP. False positives from
//! unrelated words that happen to contain a stem are a known
//! limitation, not a defect.
//!
//! There is NO diacritic normalization: accented and unaccented
//! variants are listed separately in the lexicon, and an accented stem
//! will not match its unaccented spelling.

use tracing::trace;

/// An immutable set of lowercase keyword stems.
///
/// Stems are grouped by topic below for documentation only — matching
/// is flat (any stem, any category).
#[derive(Debug, Clone)]
pub struct Lexicon {
    stems: Vec<String>,
}

impl Lexicon {
    /// Build a lexicon from arbitrary stems. Stems are lowercased so
    /// matching against a lowercased question stays consistent.
    pub fn new<I, S>(stems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stems: stems.into_iter().map(|s| s.into().to_lowercase()).collect(),
        }
    }

    /// The shipped bilingual (Spanish/English) water vocabulary.
    pub fn water_spanish_english() -> Self {
        Self::new([
            // Cuerpos de agua
            "agua", "water", "lago", "lake", "río", "river", "laguna", "pond",
            "arroyo", "stream", "presa", "dam", "embalse", "reservoir",
            "manantial", "spring", "costa", "coast", "mar", "sea",
            // Calidad y parámetros
            "calidad", "quality", "ph", "hidric", "hídric",
            "contamin", "pollution", "turbidez", "turbidity",
            "temperatura", "temperature", "oxígeno", "oxygen",
            "conductividad", "conductivity", "sediment", "sedimento",
            // Limpieza y tratamiento
            "limpi", "clean", "tratamiento", "treatment", "purific",
            "filtr", "filter", "desinfec", "disinfect", "potabil",
            "sanea", "sanit", "depura", "purify",
            // Usos prácticos
            "consumo", "consumption", "beber", "drinking",
            "riego", "irrigation", "agricultura", "agriculture",
            "industrial", "industry", "recreativ", "recreational",
            "pesca", "fishing", "nadar", "swimming", "navegación",
            "doméstico", "domestic", "potable", "portable",
            // Mantenimiento y conservación
            "manteni", "maintenance", "conserva", "conservation",
            "restaurar", "restoration", "rehabilita", "rehabilitation",
            "preserva", "preserve", "proteg", "protect",
            // Problemas y soluciones
            "erosión", "erosion", "residuo", "waste",
            "basura", "trash", "contamina", "pollut",
            "vertido", "discharge", "derrame", "spill",
        ])
    }

    pub fn stems(&self) -> &[String] {
        &self.stems
    }

    pub fn len(&self) -> usize {
        self.stems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }
}

/// The domain gate. Pure function of its lexicon and input.
#[derive(Debug, Clone)]
pub struct DomainClassifier {
    lexicon: Lexicon,
}

impl DomainClassifier {
    /// Create a classifier over an explicit lexicon.
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// True iff the lowercased question contains at least one lexicon
    /// stem as a literal substring. An empty question matches nothing.
    pub fn is_in_domain(&self, question: &str) -> bool {
        let normalized = question.to_lowercase();
        match self
            .lexicon
            .stems
            .iter()
            .find(|stem| normalized.contains(stem.as_str()))
        {
            Some(stem) => {
                trace!(stem = %stem, "question matched lexicon");
                true
            }
            None => false,
        }
    }
}

impl Default for DomainClassifier {
    fn default() -> Self {
        Self::new(Lexicon::water_spanish_english())
    }
}
