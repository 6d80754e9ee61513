//! Enum synthesis.

use crate::naming::to_pascal_case;
use ironmodel_schema::{EnumHint, HintError, HintKind, JsonSchema};
use serde::Serialize;
use std::collections::HashSet;

/// One enum member.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumMember {
    /// Member identifier.
    pub name: String,
    /// Explicit value; `None` means the implicit ordinal (zero for a zero member).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    /// Schema literal the member serializes as.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serialized_value: Option<serde_json::Value>,
}

/// Synthesized enum.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumArtifact {
    /// Enum name.
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Members are bit flags.
    pub flags: bool,
    /// Members in declaration order.
    pub members: Vec<EnumMember>,
}

impl EnumArtifact {
    /// Returns true if both enums declare the same members.
    #[must_use]
    pub fn same_members(&self, other: &EnumArtifact) -> bool {
        self.flags == other.flags && self.members == other.members
    }
}

/// Builds enum definitions from schema literals and an optional hint.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumSynthesizer;

impl EnumSynthesizer {
    /// Creates a new enum synthesizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Synthesizes the enum `type_name` from `schema`'s literals.
    ///
    /// # Errors
    /// Returns `HintError::MemberCountMismatch` if member names or values do
    /// not line up with the literals, and `HintError::DuplicateEnumMember` if
    /// two members resolve to one identifier.
    pub fn synthesize(
        &self,
        type_name: &str,
        hint: Option<&EnumHint>,
        schema: &JsonSchema,
    ) -> Result<EnumArtifact, HintError> {
        let default_hint = EnumHint::default();
        let hint = hint.unwrap_or(&default_hint);

        let literals: Vec<&serde_json::Value> = schema
            .enum_values
            .iter()
            .flatten()
            .filter(|v| !v.is_null())
            .collect();

        let names: Vec<String> = match &hint.member_names {
            Some(names) => {
                if names.len() != literals.len() && !hint.allow_member_count_mismatch {
                    return Err(HintError::count_mismatch(
                        type_name,
                        "member names",
                        literals.len(),
                        names.len(),
                    ));
                }
                names.clone()
            }
            None => literals.iter().map(|l| member_name(l)).collect(),
        };

        let values: Vec<Option<i64>> = match &hint.member_values {
            Some(values) => {
                if values.len() != names.len() {
                    return Err(HintError::count_mismatch(
                        type_name,
                        "member values",
                        names.len(),
                        values.len(),
                    ));
                }
                values.iter().copied().map(Some).collect()
            }
            None if hint.flags => (0..names.len())
                .map(|index| flag_value(type_name, index).map(Some))
                .collect::<Result<Vec<_>, _>>()?,
            None => vec![None; names.len()],
        };

        let mut members = Vec::with_capacity(names.len() + 1);
        if let Some(zero) = &hint.zero_value_name {
            members.push(EnumMember {
                name: to_pascal_case(zero),
                value: None,
                serialized_value: None,
            });
        }
        for (index, (name, value)) in names.into_iter().zip(values).enumerate() {
            members.push(EnumMember {
                name,
                value,
                serialized_value: literals.get(index).map(|l| (*l).clone()),
            });
        }

        let mut seen = HashSet::new();
        for member in &members {
            if !seen.insert(member.name.as_str()) {
                return Err(HintError::DuplicateEnumMember {
                    type_name: type_name.to_string(),
                    member: member.name.clone(),
                });
            }
        }

        Ok(EnumArtifact {
            name: type_name.to_string(),
            description: hint.description.clone().or_else(|| schema.description.clone()),
            flags: hint.flags,
            members,
        })
    }
}

/// Identifier of a literal-derived member.
fn member_name(literal: &serde_json::Value) -> String {
    match literal {
        serde_json::Value::String(s) => to_pascal_case(s),
        serde_json::Value::Number(n) => {
            let mut name = String::from("Value");
            for c in n.to_string().chars() {
                match c {
                    '-' => name.push_str("Minus"),
                    '+' => name.push_str("Plus"),
                    '.' => name.push('_'),
                    'e' | 'E' => name.push('E'),
                    digit => name.push(digit),
                }
            }
            name
        }
        other => {
            let name = to_pascal_case(&other.to_string());
            if name.starts_with(|c: char| c.is_ascii_alphabetic()) {
                name
            } else {
                format!("Value{name}")
            }
        }
    }
}

/// Value of the `index`-th non-zero flag member: 2^index.
fn flag_value(type_name: &str, index: usize) -> Result<i64, HintError> {
    u32::try_from(index)
        .ok()
        .and_then(|shift| 1i64.checked_shl(shift))
        .filter(|v| *v > 0)
        .ok_or_else(|| {
            HintError::invalid_arguments(
                type_name,
                HintKind::Enum.name(),
                format!("flag member {index} does not fit in 63 bits"),
            )
        })
}
