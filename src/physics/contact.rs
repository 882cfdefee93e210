//! Surface materials and the pairwise friction / restitution table.
//!
//! Rapier only knows per-collider coefficients plus a combine rule, so the
//! table is enforced through a solver-contact hook: every collider carries its
//! material tag in `user_data` and the hook overwrites each contact's
//! coefficients with the rule registered for the pair.

use rapier3d::prelude::*;
use std::collections::HashMap;
use std::fmt;

/// Physics surface type used to look up contact rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialTag {
    Ground,
    Player,
}

impl MaterialTag {
    /// Encoding stored in collider `user_data`; 0 means untagged.
    pub fn code(self) -> u128 {
        match self {
            MaterialTag::Ground => 1,
            MaterialTag::Player => 2,
        }
    }

    pub fn from_code(code: u128) -> Option<Self> {
        match code {
            1 => Some(MaterialTag::Ground),
            2 => Some(MaterialTag::Player),
            _ => None,
        }
    }
}

impl fmt::Display for MaterialTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialTag::Ground => f.write_str("ground"),
            MaterialTag::Player => f.write_str("player"),
        }
    }
}

/// Collision response between two materials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactRule {
    pub friction: f32,
    pub restitution: f32,
}

impl ContactRule {
    /// Applied to every pair without a registered rule (untagged bodies included).
    pub const DEFAULT: ContactRule = ContactRule {
        friction: 0.3,
        restitution: 0.0,
    };
}

impl Default for ContactRule {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Fixed-at-startup table of pairwise contact rules, keyed by unordered pair.
#[derive(Debug, Default, Clone)]
pub struct ContactRules {
    rules: HashMap<(MaterialTag, MaterialTag), ContactRule>,
}

fn pair_key(a: MaterialTag, b: MaterialTag) -> (MaterialTag, MaterialTag) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl ContactRules {
    /// Registers a rule; returns `false` if the unordered pair already has one.
    pub fn insert(&mut self, a: MaterialTag, b: MaterialTag, rule: ContactRule) -> bool {
        let key = pair_key(a, b);
        if self.rules.contains_key(&key) {
            return false;
        }
        self.rules.insert(key, rule);
        true
    }

    pub fn get(&self, a: MaterialTag, b: MaterialTag) -> Option<ContactRule> {
        self.rules.get(&pair_key(a, b)).copied()
    }

    /// Rule governing two (possibly untagged) colliders.
    pub fn resolve(&self, a: Option<MaterialTag>, b: Option<MaterialTag>) -> ContactRule {
        match (a, b) {
            (Some(a), Some(b)) => self.get(a, b).unwrap_or(ContactRule::DEFAULT),
            _ => ContactRule::DEFAULT,
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl PhysicsHooks for ContactRules {
    fn modify_solver_contacts(&self, context: &mut ContactModificationContext) {
        let tag_of = |handle: ColliderHandle| {
            context
                .colliders
                .get(handle)
                .and_then(|c| MaterialTag::from_code(c.user_data))
        };
        let rule = self.resolve(tag_of(context.collider1), tag_of(context.collider2));
        for contact in context.solver_contacts.iter_mut() {
            contact.friction = rule.friction;
            contact.restitution = rule.restitution;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_order_independent() {
        let mut rules = ContactRules::default();
        let rule = ContactRule {
            friction: 0.4,
            restitution: 0.3,
        };
        assert!(rules.insert(MaterialTag::Ground, MaterialTag::Player, rule));
        assert_eq!(rules.get(MaterialTag::Player, MaterialTag::Ground), Some(rule));
        assert_eq!(rules.get(MaterialTag::Ground, MaterialTag::Player), Some(rule));
    }

    #[test]
    fn duplicate_pair_rejected() {
        let mut rules = ContactRules::default();
        assert!(rules.insert(MaterialTag::Ground, MaterialTag::Player, ContactRule::DEFAULT));
        assert!(!rules.insert(
            MaterialTag::Player,
            MaterialTag::Ground,
            ContactRule {
                friction: 1.0,
                restitution: 1.0
            }
        ));
        assert_eq!(rules.len(), 1);
        assert_eq!(
            rules.get(MaterialTag::Ground, MaterialTag::Player),
            Some(ContactRule::DEFAULT)
        );
    }

    #[test]
    fn untagged_and_unregistered_use_default() {
        let mut rules = ContactRules::default();
        rules.insert(
            MaterialTag::Ground,
            MaterialTag::Player,
            ContactRule {
                friction: 0.4,
                restitution: 0.3,
            },
        );
        assert_eq!(rules.resolve(None, Some(MaterialTag::Player)), ContactRule::DEFAULT);
        assert_eq!(
            rules.resolve(Some(MaterialTag::Player), Some(MaterialTag::Player)),
            ContactRule::DEFAULT
        );
    }

    #[test]
    fn tag_codes_round_trip() {
        for tag in [MaterialTag::Ground, MaterialTag::Player] {
            assert_eq!(MaterialTag::from_code(tag.code()), Some(tag));
        }
        assert_eq!(MaterialTag::from_code(0), None);
    }
}
