//! Shipped entity graph for property-management records
//!
//! building → property → contract → payment carry attributes down the
//! inheritance chain; everything else is a plain association.

use super::builder::EntityGraphBuilder;
use super::graph::{EdgeKind, EntityGraph};

impl EntityGraph {
    /// Entity graph for buildings, units, owners, tenants, contracts, payments,
    /// suppliers, maintenance and institutions
    pub fn property_management() -> Self {
        property_management_builder().build()
    }
}

fn property_management_builder() -> EntityGraphBuilder {
    use EdgeKind::{InheritsFrom, InheritsTo, RelatedTo};

    EntityGraphBuilder::new()
        .entity(
            "building",
            &["name", "address", "city", "floors", "year_built", "parking_spaces"],
        )
        .register_relationship("building", "property", InheritsTo, &[])
        .register_relationship("building", "owner", RelatedTo, &[])
        .register_relationship("building", "maintenance", RelatedTo, &[])
        .register_relationship("building", "institution", RelatedTo, &[])
        .entity(
            "property",
            &["unit_number", "floor", "size_sqm", "rooms", "property_type", "status"],
        )
        .register_relationship("property", "building", InheritsFrom, &[])
        .register_relationship("property", "contract", InheritsTo, &[])
        .register_relationship("property", "owner", RelatedTo, &[])
        .register_relationship("property", "tenant", RelatedTo, &[])
        .register_relationship("property", "maintenance", RelatedTo, &[])
        .entity(
            "owner",
            &["full_name", "id_number", "phone", "email", "bank_account", "ownership_share"],
        )
        .register_relationship("owner", "building", RelatedTo, &[])
        .register_relationship("owner", "property", RelatedTo, &[])
        .register_relationship("owner", "contract", RelatedTo, &[])
        .entity("tenant", &["full_name", "id_number", "phone", "email", "emergency_contact"])
        .register_relationship("tenant", "property", RelatedTo, &[])
        .register_relationship("tenant", "contract", RelatedTo, &[])
        .register_relationship("tenant", "payment", RelatedTo, &[])
        .entity(
            "contract",
            &[
                "start_date",
                "end_date",
                "monthly_rent",
                "currency",
                "indexation_kind",
                "base_index",
                "custom_rate",
                "security_deposit",
            ],
        )
        .register_relationship("contract", "property", InheritsFrom, &[])
        .register_relationship("contract", "payment", InheritsTo, &[])
        .register_relationship("contract", "tenant", RelatedTo, &[])
        .register_relationship("contract", "owner", RelatedTo, &[])
        .entity("payment", &["date", "amount", "method", "status", "index_details"])
        .register_relationship("payment", "contract", InheritsFrom, &[])
        .register_relationship("payment", "tenant", RelatedTo, &[])
        .entity("supplier", &["name", "category", "phone", "email", "tax_id"])
        .register_relationship("supplier", "maintenance", RelatedTo, &[])
        .register_relationship("supplier", "institution", RelatedTo, &[])
        .entity(
            "maintenance",
            &["title", "description", "priority", "status", "reported_date", "cost"],
        )
        .register_relationship("maintenance", "property", RelatedTo, &[])
        .register_relationship("maintenance", "building", RelatedTo, &[])
        .register_relationship("maintenance", "supplier", RelatedTo, &[])
        .entity(
            "institution",
            &["name", "institution_type", "account_number", "contact_phone"],
        )
        .register_relationship("institution", "building", RelatedTo, &[])
        .register_relationship("institution", "supplier", RelatedTo, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_ships_all_kinds() {
        let graph = EntityGraph::property_management();
        let kinds: Vec<&str> = graph.kinds().collect();

        assert_eq!(
            kinds,
            vec![
                "building",
                "contract",
                "institution",
                "maintenance",
                "owner",
                "payment",
                "property",
                "supplier",
                "tenant",
            ]
        );
    }

    #[test]
    fn test_contract_inherits_property_and_building() {
        let graph = EntityGraph::property_management();

        let expected: BTreeSet<String> = graph
            .descriptor("property")
            .unwrap()
            .attributes
            .iter()
            .chain(graph.descriptor("building").unwrap().attributes.iter())
            .cloned()
            .collect();

        let first = graph.collect_inherited_attributes("contract");
        let second = graph.collect_inherited_attributes("contract");

        assert_eq!(first, expected);
        assert_eq!(first, second);
        assert_eq!(graph, EntityGraph::property_management());
    }

    #[test]
    fn test_payment_inherits_whole_chain() {
        let graph = EntityGraph::property_management();
        let attrs = graph.collect_inherited_attributes("payment");

        assert!(attrs.contains("monthly_rent"));
        assert!(attrs.contains("unit_number"));
        assert!(attrs.contains("address"));
        assert!(!attrs.contains("amount"));
        assert!(graph.is_inheriting("payment", "building"));
    }

    #[test]
    fn test_shipped_associations() {
        let graph = EntityGraph::property_management();

        assert!(graph.are_related("maintenance", "supplier"));
        assert!(!graph.are_related("supplier", "owner"));
        assert!(!graph.are_related("owner", "supplier"));
        assert!(graph.collect_inherited_attributes("supplier").is_empty());
    }

    #[test]
    fn test_inherits_edges_are_mirrored() {
        let graph = EntityGraph::property_management();

        for kind in graph.kinds() {
            let descriptor = graph.descriptor(kind).unwrap();
            for parent in &descriptor.inherits_from {
                let parent_descriptor = graph.descriptor(parent).unwrap();
                assert!(
                    parent_descriptor.inherits_to.iter().any(|c| c == kind),
                    "{} inherits from {} but {} does not list it in inherits_to",
                    kind,
                    parent,
                    parent
                );
            }
        }
    }
}
