//! Prompt variant expansion.
//!
//! Derives N prompts from one base prompt by appending a cyclic list of
//! style modifiers, so repeated calls to the same model still produce
//! visually distinct images. Fully deterministic.

use crate::types::PromptVariant;

/// Style modifiers appended to the base prompt, cycled in order.
pub const STYLE_MODIFIERS: [&str; 5] = [
    "different lighting",
    "alternate angle",
    "artistic style",
    "abstract version",
    "photorealistic version",
];

/// Expand a base prompt into exactly `count` ordered variants.
///
/// Variant i carries modifier `STYLE_MODIFIERS[i % 5]`; identical inputs
/// always yield identical output sequences. `count` is pre-validated by
/// the caller to lie in 1..=10.
pub fn generate(base_prompt: &str, count: usize) -> Vec<PromptVariant> {
    (0..count)
        .map(|i| {
            let label = STYLE_MODIFIERS[i % STYLE_MODIFIERS.len()];
            PromptVariant {
                text: format!("{base_prompt}, {label}"),
                label: label.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_exact_count() {
        for count in 1..=10 {
            assert_eq!(generate("a red fox", count).len(), count);
        }
    }

    #[test]
    fn test_labels_cycle() {
        let variants = generate("a red fox", 7);
        for (i, variant) in variants.iter().enumerate() {
            assert_eq!(variant.label, STYLE_MODIFIERS[i % 5]);
        }
        // Sixth variant wraps back to the first modifier
        assert_eq!(variants[5].label, "different lighting");
    }

    #[test]
    fn test_variant_text_format() {
        let variants = generate("a red fox", 3);
        assert_eq!(variants[0].text, "a red fox, different lighting");
        assert_eq!(variants[1].text, "a red fox, alternate angle");
        assert_eq!(variants[2].text, "a red fox, artistic style");
    }

    #[test]
    fn test_generate_is_idempotent() {
        assert_eq!(generate("a castle", 10), generate("a castle", 10));
    }
}
