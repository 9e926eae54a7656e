//! Card picker registration
//!
//! Static metadata the card declares to the host's picker registry: a type
//! identifier, display name, description, and whether the picker may show a
//! live preview. Metadata only, no behavior.

/// Metadata one card type contributes to the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardMeta {
    pub type_id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub preview: bool,
}

/// This crate's card
pub const SELECT_INPUT_CARD: CardMeta = CardMeta {
    type_id: "select-input-card",
    name: "Select Input Card",
    description: "A card that can be used as an input text or select input, \
                  with delete and send functionalities, including input \
                  validation and security enhancements.",
    preview: true,
};

/// Host-side picker registry
#[derive(Debug, Default)]
pub struct CardRegistry {
    cards: Vec<CardMeta>,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the cards this crate ships
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(SELECT_INPUT_CARD);
        registry
    }

    /// Register a card type, replacing any earlier entry with the same id
    pub fn register(&mut self, meta: CardMeta) {
        self.cards.retain(|existing| existing.type_id != meta.type_id);
        self.cards.push(meta);
    }

    pub fn get(&self, type_id: &str) -> Option<&CardMeta> {
        self.cards.iter().find(|meta| meta.type_id == type_id)
    }

    pub fn list(&self) -> &[CardMeta] {
        &self.cards
    }
}
