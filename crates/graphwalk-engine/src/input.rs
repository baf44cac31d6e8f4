//! Validation of text typed into the label and weight prompts.

use graphwalk_core::{Label, Weight};

use crate::error::{EngineError, EngineResult};

/// Accept exactly one non-whitespace character.
pub fn parse_vertex_label(input: &str) -> EngineResult<Label> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_whitespace() => Ok(Label::new(input)?),
        _ => Err(EngineError::InvalidLabelInput {
            input: input.to_string(),
        }),
    }
}

/// Accept an optional sign followed by one or two digits.
pub fn parse_edge_weight(input: &str) -> EngineResult<Weight> {
    Ok(input.parse::<Weight>()?)
}
