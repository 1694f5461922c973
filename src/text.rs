//! Ingredient references in step text
//!
//! Step text written by the recipe author can mention an ingredient with
//! `@name`. The name is the shortest run of Korean syllables, ASCII letters,
//! digits and spaces that is followed by whitespace, the end of the text or
//! one of `.`, `,` and `!`. So in `@간장 2큰술을 넣는다` the reference is `간장`.
//!
//! When rendering, references to an ingredient of the recipe are replaced by
//! the ingredient name and its current amount. Unknown references are left as
//! they were written.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::{
    model::{Ingredient, Recipe},
    quantity::Quantity,
    scale::ScalingState,
    span::Span,
    Scaler,
};

static REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@([가-힣a-zA-Z0-9 ]+?)(?:\s|[.,!]|$)").expect("valid reference regex")
});

/// Opening tag of the emphasis around a substituted reference
pub const EMPHASIS_OPEN: &str = r#"<span style="font-weight:bold;color:#ff7a00">"#;
/// Closing tag of the emphasis around a substituted reference
pub const EMPHASIS_CLOSE: &str = "</span>";

/// A piece of step text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Item<'a> {
    /// Just plain text
    Text { value: &'a str, span: Span },
    /// An `@name` reference
    ///
    /// The span covers the `@` and the name, without the terminator.
    Reference { name: &'a str, span: Span },
}

/// Step text split into plain text and references
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstructionText<'a> {
    source: &'a str,
    items: Vec<Item<'a>>,
}

impl<'a> InstructionText<'a> {
    pub fn parse(source: &'a str) -> Self {
        let mut items = Vec::new();
        let mut last = 0;

        for caps in REFERENCE.captures_iter(source) {
            let Some(name) = caps.get(1) else { continue };
            // the '@' right before the name
            let start = name.start() - 1;
            if start > last {
                items.push(Item::Text {
                    value: &source[last..start],
                    span: Span::new(last, start),
                });
            }
            items.push(Item::Reference {
                name: name.as_str().trim(),
                span: Span::new(start, name.end()),
            });
            last = name.end();
        }

        if last < source.len() {
            items.push(Item::Text {
                value: &source[last..],
                span: Span::new(last, source.len()),
            });
        }

        Self { source, items }
    }

    /// The original text
    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn items(&self) -> &[Item<'a>] {
        &self.items
    }

    /// Names of all the references, trimmed
    pub fn references(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.items.iter().filter_map(|item| match item {
            Item::Reference { name, .. } => Some(*name),
            Item::Text { .. } => None,
        })
    }
}

/// Ingredients by trimmed name, the only name lookup of the crate
///
/// Names match exactly and case sensitively after trimming. The first
/// ingredient in display order wins.
pub(crate) struct NameIndex<'r>(IndexMap<&'r str, &'r Ingredient>);

impl<'r> NameIndex<'r> {
    pub(crate) fn new(recipe: &'r Recipe) -> Self {
        let mut map = IndexMap::new();
        for ingredient in recipe.ingredients() {
            map.entry(ingredient.name.trim()).or_insert(ingredient);
        }
        Self(map)
    }

    fn get(&self, name: &str) -> Option<&'r Ingredient> {
        self.0.get(name.trim()).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Markup {
    Html,
    Plain,
}

impl Scaler {
    /// Substitutes the references in `raw` with emphasized live amounts
    ///
    /// The emphasis is [`EMPHASIS_OPEN`] and [`EMPHASIS_CLOSE`] around the
    /// escaped name and amount. The rest of `raw` is copied as is; it is
    /// trusted authored content and is not sanitized here.
    pub fn render_instruction(
        &self,
        raw: &str,
        recipe: &Recipe,
        state: &ScalingState,
    ) -> String {
        self.render_with_index(raw, recipe, state, &NameIndex::new(recipe))
    }

    /// Same as [`Self::render_instruction`] without any markup
    pub fn render_instruction_plain(
        &self,
        raw: &str,
        recipe: &Recipe,
        state: &ScalingState,
    ) -> String {
        let text = InstructionText::parse(raw);
        self.render(&text, recipe, state, &NameIndex::new(recipe), Markup::Plain)
    }

    pub(crate) fn render_with_index(
        &self,
        raw: &str,
        recipe: &Recipe,
        state: &ScalingState,
        names: &NameIndex,
    ) -> String {
        let text = InstructionText::parse(raw);
        self.render(&text, recipe, state, names, Markup::Html)
    }

    fn render(
        &self,
        text: &InstructionText,
        recipe: &Recipe,
        state: &ScalingState,
        names: &NameIndex,
        markup: Markup,
    ) -> String {
        let mut out = String::with_capacity(text.source().len());
        for item in text.items() {
            match item {
                Item::Text { value, .. } => out.push_str(value),
                Item::Reference { name, span } => match names.get(name) {
                    Some(ingredient) => {
                        let substituted = self.reference_text(recipe, ingredient, state);
                        match markup {
                            Markup::Html => {
                                out.push_str(EMPHASIS_OPEN);
                                escape_html(&substituted, &mut out);
                                out.push_str(EMPHASIS_CLOSE);
                            }
                            Markup::Plain => out.push_str(&substituted),
                        }
                    }
                    None => out.push_str(&text.source()[span.range()]),
                },
            }
        }
        out
    }

    fn reference_text(
        &self,
        recipe: &Recipe,
        ingredient: &Ingredient,
        state: &ScalingState,
    ) -> String {
        let name = ingredient.name.trim();
        if state.is_zero_quantity() {
            return name.to_owned();
        }
        let amount = self.display_amount(recipe, ingredient, state);
        format!("{name} {}", Quantity::new(amount, ingredient.unit.as_str()))
    }
}

fn escape_html(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}
