// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;
use smol_str::SmolStr;

use super::ids::NodeId;
use super::node::ParentRef;

/// The logic primitive an element represents.
///
/// `Display`/`FromStr` use the names persisted in the document's `ElementType` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    NOContact,
    NCContact,
    Coil,
    OneShotCoil,
    SetCoil,
    ResetCoil,
    AddMath,
    SubtractMath,
    MultiplyMath,
    DivideMath,
    MoveMath,
    GreaterCompare,
    LessCompare,
    GreaterOrEqualCompare,
    LessOrEqualCompare,
    EqualCompare,
    NotEqualCompare,
    OnDelayTimer,
    OffDelayTimer,
    CountUp,
    CountDown,
    Reset,
}

/// Groups of kinds sharing binding rules, glyph size and variable catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementFamily {
    Contact,
    Coil,
    Math,
    Move,
    Compare,
    Timer,
    Counter,
    Reset,
}

impl ElementKind {
    pub const ALL: [ElementKind; 22] = [
        Self::NOContact,
        Self::NCContact,
        Self::Coil,
        Self::OneShotCoil,
        Self::SetCoil,
        Self::ResetCoil,
        Self::AddMath,
        Self::SubtractMath,
        Self::MultiplyMath,
        Self::DivideMath,
        Self::MoveMath,
        Self::GreaterCompare,
        Self::LessCompare,
        Self::GreaterOrEqualCompare,
        Self::LessOrEqualCompare,
        Self::EqualCompare,
        Self::NotEqualCompare,
        Self::OnDelayTimer,
        Self::OffDelayTimer,
        Self::CountUp,
        Self::CountDown,
        Self::Reset,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::NOContact => "NOContact",
            Self::NCContact => "NCContact",
            Self::Coil => "Coil",
            Self::OneShotCoil => "OneShotCoil",
            Self::SetCoil => "SetCoil",
            Self::ResetCoil => "ResetCoil",
            Self::AddMath => "AddMath",
            Self::SubtractMath => "SubtractMath",
            Self::MultiplyMath => "MultiplyMath",
            Self::DivideMath => "DivideMath",
            Self::MoveMath => "MoveMath",
            Self::GreaterCompare => "GreaterCompare",
            Self::LessCompare => "LessCompare",
            Self::GreaterOrEqualCompare => "GreaterOrEqualCompare",
            Self::LessOrEqualCompare => "LessOrEqualCompare",
            Self::EqualCompare => "EqualCompare",
            Self::NotEqualCompare => "NotEqualCompare",
            Self::OnDelayTimer => "OnDelayTimer",
            Self::OffDelayTimer => "OffDelayTimer",
            Self::CountUp => "CountUp",
            Self::CountDown => "CountDown",
            Self::Reset => "Reset",
        }
    }

    pub fn family(self) -> ElementFamily {
        match self {
            Self::NOContact | Self::NCContact => ElementFamily::Contact,
            Self::Coil | Self::OneShotCoil | Self::SetCoil | Self::ResetCoil => ElementFamily::Coil,
            Self::AddMath | Self::SubtractMath | Self::MultiplyMath | Self::DivideMath => {
                ElementFamily::Math
            }
            Self::MoveMath => ElementFamily::Move,
            Self::GreaterCompare
            | Self::LessCompare
            | Self::GreaterOrEqualCompare
            | Self::LessOrEqualCompare
            | Self::EqualCompare
            | Self::NotEqualCompare => ElementFamily::Compare,
            Self::OnDelayTimer | Self::OffDelayTimer => ElementFamily::Timer,
            Self::CountUp | Self::CountDown => ElementFamily::Counter,
            Self::Reset => ElementFamily::Reset,
        }
    }

    /// Number of variable slots an element of this kind carries.
    pub fn binding_count(self) -> usize {
        match self.family() {
            ElementFamily::Math => 3,
            ElementFamily::Move | ElementFamily::Compare => 2,
            ElementFamily::Contact
            | ElementFamily::Coil
            | ElementFamily::Timer
            | ElementFamily::Counter
            | ElementFamily::Reset => 1,
        }
    }

    /// Output-only kinds: direct children of a wire, never inside a branch.
    pub fn is_coil(self) -> bool {
        self.family() == ElementFamily::Coil
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown element kind '{0}'")]
pub struct UnknownElementKind(pub String);

impl FromStr for ElementKind {
    type Err = UnknownElementKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownElementKind(s.to_owned()))
    }
}

/// Ordered variable slots; `None` is an unset slot.
pub type Bindings = SmallVec<[Option<SmolStr>; 3]>;

/// A leaf node: one logic primitive with its variable bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub(crate) id: NodeId,
    kind: ElementKind,
    bindings: Bindings,
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) width: f64,
    pub(crate) parent: Option<ParentRef>,
}

impl Element {
    /// Creates an element with every slot unset.
    pub(crate) fn new(id: NodeId, kind: ElementKind) -> Self {
        let bindings = (0..kind.binding_count()).map(|_| None).collect();
        Self {
            id,
            kind,
            bindings,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            parent: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn bindings(&self) -> &[Option<SmolStr>] {
        &self.bindings
    }

    pub fn binding(&self, slot: usize) -> Option<&str> {
        self.bindings.get(slot).and_then(|b| b.as_deref())
    }

    /// Sets or clears one slot. Returns `false` when `slot` is out of range for the kind.
    pub(crate) fn set_binding(&mut self, slot: usize, name: Option<SmolStr>) -> bool {
        match self.bindings.get_mut(slot) {
            Some(existing) => {
                *existing = name.filter(|n| !n.is_empty());
                true
            }
            None => false,
        }
    }

    /// First unset slot, if any.
    pub fn first_unset_slot(&self) -> Option<usize> {
        self.bindings.iter().position(Option::is_none)
    }

    pub fn is_fully_bound(&self) -> bool {
        self.first_unset_slot().is_none()
    }
}
