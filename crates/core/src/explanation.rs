//! Explanation assembly shared by the scorers.
//!
//! A scorer describes its wording as ordered groups of fragment rules. Within a
//! group the first rule whose condition holds contributes its fragment; groups
//! are evaluated in declaration order. Layout is applied only at render time.

use std::fmt;

use serde::{Serialize, Serializer};

/// A condition paired with the fragment it produces.
pub struct FragmentRule<C> {
    pub when: fn(&C) -> bool,
    pub text: fn(&C) -> String,
}

impl<C> FragmentRule<C> {
    pub const fn new(when: fn(&C) -> bool, text: fn(&C) -> String) -> Self {
        Self { when, text }
    }

    /// Rule that always applies; used as the final arm of a tier group.
    pub const fn otherwise(text: fn(&C) -> String) -> Self {
        Self { when: always, text }
    }
}

fn always<C>(_: &C) -> bool {
    true
}

/// First matching fragment in `rules`, if any.
pub fn first_match<C>(rules: &[FragmentRule<C>], context: &C) -> Option<String> {
    rules.iter().find(|rule| (rule.when)(context)).map(|rule| (rule.text)(context))
}

/// One fragment per group that has a matching rule, in group order.
pub fn assemble<C>(groups: &[&[FragmentRule<C>]], context: &C) -> Vec<String> {
    groups.iter().filter_map(|group| first_match(group, context)).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// `"<headline> <fragment> <fragment>"`
    Sentences,
    /// `"<headline>. Factors: <fragment>, <fragment>."`
    FactorList,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Explanation {
    pub headline: String,
    pub fragments: Vec<String>,
    pub layout: Layout,
}

impl Explanation {
    pub fn new(headline: impl Into<String>, fragments: Vec<String>, layout: Layout) -> Self {
        Self { headline: headline.into(), fragments, layout }
    }

    pub fn render(&self) -> String {
        match self.layout {
            Layout::Sentences => {
                if self.fragments.is_empty() {
                    self.headline.clone()
                } else {
                    format!("{} {}", self.headline, self.fragments.join(" "))
                }
            }
            Layout::FactorList => {
                format!("{}. Factors: {}.", self.headline, self.fragments.join(", "))
            }
        }
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Serialize for Explanation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}
