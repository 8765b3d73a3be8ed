// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field specifications: how columns parse, and which roles they play.

extern crate alloc;

use alloc::string::{String, ToString};

use crate::dataset::{Dataset, FieldId};

/// How a column's raw strings are parsed into [`crate::Value`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Keep the raw string.
    Text,
    /// Parse as `f64`; failures become `NaN`.
    Number,
    /// Parse as a `YYYY-MM-DD` date into seconds since the Unix epoch;
    /// failures become `NaN`.
    Date,
}

/// A column name plus its parse rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Column name as it appears in the header row.
    pub name: String,
    /// Parse rule for the column.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// A text column.
    pub fn text(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Text,
        }
    }

    /// A numeric column.
    pub fn number(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Number,
        }
    }

    /// A `YYYY-MM-DD` date column.
    pub fn date(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Date,
        }
    }
}

/// Errors returned when resolving [`FieldRoles`] against a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleError {
    /// A role names a field the dataset does not contain.
    UnknownField(String),
}

/// Declares which dataset fields serve each visual role for one chart
/// invocation.
///
/// All roles are optional; each chart kind reads the subset it needs (a
/// bubble chart reads `x`/`size`/`segment`/`name`, a Sankey reads
/// `source`/`target`/`value`, and so on).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRoles {
    /// Field mapped to the x position.
    pub x: Option<String>,
    /// Field mapped to the y position.
    pub y: Option<String>,
    /// Field mapped to mark size.
    pub size: Option<String>,
    /// Field mapped to color.
    pub color: Option<String>,
    /// Field used to segment/group records (e.g. the split-mode band).
    pub segment: Option<String>,
    /// Field providing display names (also the search field).
    pub name: Option<String>,
    /// Flow source field (Sankey).
    pub source: Option<String>,
    /// Flow target field (Sankey).
    pub target: Option<String>,
    /// Flow weight field (Sankey).
    pub value: Option<String>,
}

/// [`FieldRoles`] resolved to dataset field ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleIds {
    /// Resolved x field.
    pub x: Option<FieldId>,
    /// Resolved y field.
    pub y: Option<FieldId>,
    /// Resolved size field.
    pub size: Option<FieldId>,
    /// Resolved color field.
    pub color: Option<FieldId>,
    /// Resolved segment field.
    pub segment: Option<FieldId>,
    /// Resolved name field.
    pub name: Option<FieldId>,
    /// Resolved flow source field.
    pub source: Option<FieldId>,
    /// Resolved flow target field.
    pub target: Option<FieldId>,
    /// Resolved flow weight field.
    pub value: Option<FieldId>,
}

impl FieldRoles {
    /// Sets the x field.
    pub fn with_x(mut self, name: &str) -> Self {
        self.x = Some(name.to_string());
        self
    }

    /// Sets the y field.
    pub fn with_y(mut self, name: &str) -> Self {
        self.y = Some(name.to_string());
        self
    }

    /// Sets the size field.
    pub fn with_size(mut self, name: &str) -> Self {
        self.size = Some(name.to_string());
        self
    }

    /// Sets the color field.
    pub fn with_color(mut self, name: &str) -> Self {
        self.color = Some(name.to_string());
        self
    }

    /// Sets the segment field.
    pub fn with_segment(mut self, name: &str) -> Self {
        self.segment = Some(name.to_string());
        self
    }

    /// Sets the name (and search) field.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Sets the flow source/target/value fields.
    pub fn with_flow(mut self, source: &str, target: &str, value: &str) -> Self {
        self.source = Some(source.to_string());
        self.target = Some(target.to_string());
        self.value = Some(value.to_string());
        self
    }

    /// Resolves every named role to a [`FieldId`] in `dataset`.
    ///
    /// Fails with [`RoleError::UnknownField`] if any named field is absent.
    pub fn resolve(&self, dataset: &Dataset) -> Result<RoleIds, RoleError> {
        let lookup = |name: &Option<String>| -> Result<Option<FieldId>, RoleError> {
            match name {
                None => Ok(None),
                Some(n) => dataset
                    .field_id(n)
                    .map(Some)
                    .ok_or_else(|| RoleError::UnknownField(n.clone())),
            }
        };
        Ok(RoleIds {
            x: lookup(&self.x)?,
            y: lookup(&self.y)?,
            size: lookup(&self.size)?,
            color: lookup(&self.color)?,
            segment: lookup(&self.segment)?,
            name: lookup(&self.name)?,
            source: lookup(&self.source)?,
            target: lookup(&self.target)?,
            value: lookup(&self.value)?,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::value::Value;

    #[test]
    fn resolve_maps_names_and_rejects_unknown_fields() {
        let mut d = Dataset::new(vec![FieldSpec::text("industry"), FieldSpec::number("tax")]);
        d.push_row(vec![Value::from("Mining"), Value::from(4.0)])
            .unwrap();

        let roles = FieldRoles::default().with_x("tax").with_name("industry");
        let ids = roles.resolve(&d).unwrap();
        assert_eq!(ids.x, Some(FieldId(1)));
        assert_eq!(ids.name, Some(FieldId(0)));
        assert_eq!(ids.size, None);

        let bad = FieldRoles::default().with_size("revenue");
        assert_eq!(
            bad.resolve(&d),
            Err(RoleError::UnknownField("revenue".into()))
        );
    }
}
