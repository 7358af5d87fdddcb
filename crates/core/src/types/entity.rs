//! Entity categories the purge operates on.

use serde::{Deserialize, Serialize};

/// A category of shop data that can be bulk-deleted.
///
/// Each variant names one collection of persisted records. The categories
/// are independent for deletion purposes; [`EntityKind::PURGE_ORDER`] lists
/// them in an order that removes dependent data (checkouts, transactions,
/// payments, orders) before anything it references, so the store never sees
/// a foreign-key violation.
///
/// Shop configuration - staff accounts, site settings, navigation and the
/// like - has no variant here on purpose: the purge must never touch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Checkouts,
    TransactionItems,
    Transactions,
    Payments,
    Orders,
    Products,
    ProductTypes,
    Attributes,
    Categories,
    Collections,
    Promotions,
    ShippingMethods,
    ShippingZones,
    Vouchers,
    GiftCards,
    Warehouses,
    Pages,
    PageTypes,
    Webhooks,
}

impl EntityKind {
    /// Every category, in deletion order.
    ///
    /// Child data first (a checkout references products and shipping
    /// methods, an order references products and warehouses), then catalog
    /// data, then the standalone categories that nothing references.
    pub const PURGE_ORDER: [Self; 19] = [
        Self::Checkouts,
        Self::TransactionItems,
        Self::Transactions,
        Self::Payments,
        Self::Orders,
        Self::Products,
        Self::ProductTypes,
        Self::Attributes,
        Self::Categories,
        Self::Collections,
        Self::Promotions,
        Self::ShippingMethods,
        Self::ShippingZones,
        Self::Vouchers,
        Self::GiftCards,
        Self::Warehouses,
        Self::Pages,
        Self::PageTypes,
        Self::Webhooks,
    ];

    /// Human-readable name used in report lines ("Removed <name>, total: N").
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Checkouts => "checkouts",
            Self::TransactionItems => "transaction items",
            Self::Transactions => "transactions",
            Self::Payments => "payments",
            Self::Orders => "orders",
            Self::Products => "products",
            Self::ProductTypes => "product types",
            Self::Attributes => "attributes",
            Self::Categories => "categories",
            Self::Collections => "collections",
            Self::Promotions => "promotions",
            Self::ShippingMethods => "shipping methods",
            Self::ShippingZones => "shipping zones",
            Self::Vouchers => "vouchers",
            Self::GiftCards => "gift cards",
            Self::Warehouses => "warehouses",
            Self::Pages => "pages",
            Self::PageTypes => "page types",
            Self::Webhooks => "webhooks",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purge_order_starts_with_dependent_data() {
        assert_eq!(EntityKind::PURGE_ORDER.first(), Some(&EntityKind::Checkouts));
        assert_eq!(EntityKind::PURGE_ORDER.last(), Some(&EntityKind::Webhooks));
    }

    #[test]
    fn test_purge_order_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for kind in EntityKind::PURGE_ORDER {
            assert!(seen.insert(kind), "{kind} listed twice");
        }
        assert_eq!(seen.len(), 19);
    }

    #[test]
    fn test_orders_removed_before_products_and_warehouses() {
        let position = |kind: EntityKind| {
            EntityKind::PURGE_ORDER
                .iter()
                .position(|&k| k == kind)
                .unwrap_or(usize::MAX)
        };
        assert!(position(EntityKind::Orders) < position(EntityKind::Products));
        assert!(position(EntityKind::Orders) < position(EntityKind::Warehouses));
        assert!(position(EntityKind::Checkouts) < position(EntityKind::ShippingMethods));
    }

    #[test]
    fn test_display_matches_report_names() {
        assert_eq!(EntityKind::TransactionItems.to_string(), "transaction items");
        assert_eq!(EntityKind::GiftCards.to_string(), "gift cards");
        assert_eq!(EntityKind::PageTypes.to_string(), "page types");
    }
}
