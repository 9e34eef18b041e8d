//! Built-in abbreviation set.
//!
//! Curated from the standard Lean editor abbreviations. Treated as an opaque
//! configuration asset: the engine never generates or mutates it, and hosts
//! may substitute their own table. Values may repeat (`\and` and `\wedge`
//! both give `∧`); keys are unique.

use std::sync::OnceLock;

use crate::table::AbbreviationTable;

#[rustfmt::skip]
pub const BUILTIN_ABBREVIATIONS: &[(&str, &str)] = &[
    // Arrows and logic.
    ("\\to", "→"), ("\\r", "→"), ("\\rightarrow", "→"),
    ("\\l", "←"), ("\\leftarrow", "←"),
    ("\\iff", "↔"), ("\\Rightarrow", "⇒"), ("\\Leftarrow", "⇐"),
    ("\\Leftrightarrow", "⇔"), ("\\mapsto", "↦"),
    ("\\up", "↑"), ("\\down", "↓"), ("\\uparrow", "↑"), ("\\downarrow", "↓"),
    ("\\forall", "∀"), ("\\all", "∀"), ("\\exists", "∃"), ("\\ex", "∃"),
    ("\\uniq", "∃!"),
    ("\\and", "∧"), ("\\wedge", "∧"), ("\\or", "∨"), ("\\vee", "∨"),
    ("\\not", "¬"), ("\\neg", "¬"),
    ("\\ne", "≠"), ("\\le", "≤"), ("\\ge", "≥"), ("\\ll", "≪"), ("\\gg", "≫"),
    ("\\mid", "∣"),
    ("\\vdash", "⊢"), ("\\entails", "⊢"), ("\\models", "⊨"),
    ("\\top", "⊤"), ("\\bot", "⊥"),
    ("\\equiv", "≡"), ("\\approx", "≈"), ("\\cong", "≅"), ("\\simeq", "≃"),
    ("\\propto", "∝"),
    // Sets.
    ("\\in", "∈"), ("\\notin", "∉"), ("\\nin", "∉"),
    ("\\sub", "⊂"), ("\\sube", "⊆"), ("\\supset", "⊃"), ("\\supe", "⊇"),
    ("\\union", "∪"), ("\\cup", "∪"), ("\\inter", "∩"), ("\\cap", "∩"),
    ("\\empty", "∅"), ("\\emptyset", "∅"), ("\\setminus", "∖"),
    ("\\powerset", "𝒫"),
    // Number domains.
    ("\\N", "ℕ"), ("\\nat", "ℕ"), ("\\Z", "ℤ"), ("\\int", "ℤ"),
    ("\\Q", "ℚ"), ("\\rat", "ℚ"), ("\\R", "ℝ"), ("\\real", "ℝ"),
    ("\\C", "ℂ"), ("\\complex", "ℂ"),
    ("\\bbA", "𝔸"), ("\\bbB", "𝔹"), ("\\bbF", "𝔽"),
    // Greek, lowercase.
    ("\\alpha", "α"), ("\\a", "α"), ("\\beta", "β"), ("\\b", "β"),
    ("\\gamma", "γ"), ("\\g", "γ"), ("\\delta", "δ"), ("\\d", "δ"),
    ("\\epsilon", "ε"), ("\\e", "ε"), ("\\zeta", "ζ"), ("\\eta", "η"),
    ("\\theta", "θ"), ("\\iota", "ι"), ("\\kappa", "κ"),
    ("\\lambda", "λ"), ("\\fun", "λ"), ("\\lam", "λ"),
    ("\\mu", "μ"), ("\\nu", "ν"), ("\\xi", "ξ"), ("\\pi", "π"),
    ("\\rho", "ρ"), ("\\sigma", "σ"), ("\\tau", "τ"), ("\\upsilon", "υ"),
    ("\\phi", "φ"), ("\\chi", "χ"), ("\\psi", "ψ"), ("\\omega", "ω"),
    // Greek, uppercase.
    ("\\Gamma", "Γ"), ("\\Delta", "Δ"), ("\\Theta", "Θ"), ("\\Lambda", "Λ"),
    ("\\Xi", "Ξ"), ("\\Pi", "Π"), ("\\Sigma", "Σ"), ("\\Phi", "Φ"),
    ("\\Psi", "Ψ"), ("\\Omega", "Ω"),
    // Operators.
    ("\\times", "×"), ("\\x", "×"), ("\\cdot", "·"),
    ("\\circ", "∘"), ("\\comp", "∘"),
    ("\\oplus", "⊕"), ("\\otimes", "⊗"),
    ("\\pm", "±"), ("\\mp", "∓"), ("\\div", "÷"), ("\\sqrt", "√"),
    ("\\infty", "∞"), ("\\sum", "∑"), ("\\prod", "∏"),
    ("\\partial", "∂"), ("\\nabla", "∇"), ("\\grad", "∇"),
    ("\\aleph", "ℵ"), ("\\hbar", "ℏ"), ("\\ell", "ℓ"),
    ("\\inv", "⁻¹"), ("\\dagger", "†"), ("\\star", "⋆"), ("\\bullet", "•"),
    ("\\dots", "⋯"), ("\\ldots", "…"),
    // Brackets.
    ("\\langle", "⟨"), ("\\rangle", "⟩"),
    ("\\lceil", "⌈"), ("\\rceil", "⌉"),
    ("\\lfloor", "⌊"), ("\\rfloor", "⌋"),
    ("\\llbracket", "⟦"), ("\\rrbracket", "⟧"),
];

/// The built-in table, constructed on first use and shared thereafter.
///
/// The source list is validated at construction; a malformed entry here is a
/// programming error, so this panics only if the list above is edited badly.
#[must_use]
pub fn builtin_table() -> &'static AbbreviationTable {
    static TABLE: OnceLock<AbbreviationTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        AbbreviationTable::from_pairs(BUILTIN_ABBREVIATIONS.iter().copied())
            .unwrap_or_else(|e| panic!("built-in abbreviation table: {e}"))
    })
}
