// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

#[cfg(test)]
mod tests {
    use stack_lib::{
        api::{Identity, Kind, Property, Resource, Scope, ScopeField, Value},
        field::{Clears, Field, FieldState, Properties, UnsetField},
        request::RequestBuilder,
    };

    fn host_identity() -> Identity {
        Identity {
            resource: Resource::Entity(Kind::Host),
            scope: Scope::default().with(ScopeField::Zone, "dc1"),
            name: "web01".to_string(),
        }
    }

    #[test]
    fn unmentioned_field_is_empty() {
        let rank = Field::<u32>::from_flag(Property::Rank, None, true);
        assert_eq!(rank.state(), &FieldState::Unspecified);
        assert_eq!(rank.as_optional(), None);
        assert_eq!(rank.value(), 0);
    }

    #[test]
    fn explicit_zero_needs_accept_zero() {
        let accepted = Field::from_flag(Property::Rank, Some(0u32), true);
        assert!(accepted.is_provided());
        assert_eq!(accepted.as_optional(), Some(&0));

        let dropped = Field::from_flag(Property::Location, Some(String::new()), false);
        assert!(!dropped.is_provided());
        assert_eq!(dropped.as_optional(), None);
    }

    #[test]
    fn clear_signal_is_never_false() {
        assert_eq!(UnsetField::new(Property::Make, false).as_clear_signal(), None);
        assert_eq!(UnsetField::new(Property::Make, true).as_clear_signal(), Some(true));
    }

    #[test]
    fn joined_pair_clears_both() {
        let mut clears = Clears::new()
            .with(UnsetField::new(Property::Make, false))
            .with(UnsetField::new(Property::Model, true))
            .with(UnsetField::new(Property::Slot, false));
        clears.join(Property::Make, Property::Model);

        let requested: Vec<_> = clears.requested().collect();
        assert_eq!(requested, vec![Property::Make, Property::Model]);
    }

    #[test]
    fn request_carries_only_provided_fields() {
        let properties = Properties::new()
            .with(Field::from_flag(Property::Rank, Some(0u32), true))
            .with(Field::<u32>::from_flag(Property::Slot, None, true))
            .with(Field::given(Property::Location, "row4".to_string()))
            .with(Field::<String>::unspecified(Property::Rack));

        let request = RequestBuilder::new(host_identity()).assign(&properties);

        assert_eq!(request.set.len(), 2);
        assert_eq!(request.set.get(&Property::Rank), Some(&Value::Number(0)));
        assert_eq!(
            request.set.get(&Property::Location),
            Some(&Value::Text("row4".to_string()))
        );
        assert!(request.unset.is_empty());
    }

    #[test]
    fn building_is_pure() {
        let builder = RequestBuilder::new(host_identity());
        let properties =
            Properties::new().with(Field::given(Property::Type, "metal".to_string()));
        let clears = Clears::new().with(UnsetField::new(Property::Rank, true));

        assert_eq!(builder.assign(&properties), builder.assign(&properties));
        assert_eq!(builder.clear(&clears), builder.clear(&clears));
        assert!(builder.clear(&clears).set.is_empty());
    }
}
