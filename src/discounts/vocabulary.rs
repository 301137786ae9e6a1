// Condition and operator vocabularies consumed by the admin form UI
//
// These lists drive the dropdowns in the rule builder. The intake layer
// deliberately does not enforce membership; free text is sanitized and
// stored as-is, so the vocabulary is advisory for clients.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Attributes a condition can evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConditionField {
    CartSubtotalPrice,
    CartQuantity,
    CartTotalWeight,
    CartItemProduct,
    CartItemVariation,
    CartItemCategory,
    CartItemTag,
    CartItemRegularPrice,
    CustomerIsLoggedIn,
    CustomerRole,
    CustomerSpecific,
    CustomerOrderCount,
    CustomerOrderHistoryCategory,
    CustomerShippingRegion,
    PaymentMethod,
    AppliedCoupons,
}

/// Operator families; each condition field offers exactly one family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OperatorGroup {
    Default,
    Contain,
    IsLoggedIn,
    InList,
}

impl OperatorGroup {
    /// Operator identifiers belonging to this family
    pub fn operators(self) -> &'static [&'static str] {
        match self {
            OperatorGroup::Default => &[
                "greater_than",
                "less_than",
                "equal_greater_than",
                "equal_less_than",
            ],
            OperatorGroup::Contain => &["contain_all", "contain_in_list", "not_contain_inlist"],
            OperatorGroup::IsLoggedIn => &["logged_in", "not_logged_in"],
            OperatorGroup::InList => &["in_list", "not_in_list"],
        }
    }
}

impl ConditionField {
    /// Which operator family the form offers for this field
    pub fn operator_group(self) -> OperatorGroup {
        match self {
            ConditionField::CartSubtotalPrice
            | ConditionField::CartQuantity
            | ConditionField::CartTotalWeight
            | ConditionField::CartItemRegularPrice
            | ConditionField::CustomerOrderCount => OperatorGroup::Default,
            ConditionField::CustomerIsLoggedIn => OperatorGroup::IsLoggedIn,
            ConditionField::CartItemProduct
            | ConditionField::CartItemVariation
            | ConditionField::CartItemCategory
            | ConditionField::CartItemTag
            | ConditionField::CustomerRole
            | ConditionField::CustomerSpecific
            | ConditionField::CustomerOrderHistoryCategory
            | ConditionField::CustomerShippingRegion
            | ConditionField::PaymentMethod
            | ConditionField::AppliedCoupons => OperatorGroup::Contain,
        }
    }
}

/// One selectable entry in a dropdown
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldOption {
    pub label: &'static str,
    pub value: ConditionField,
}

/// A labelled group of condition fields, mirroring the form layout
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldGroup {
    pub label: &'static str,
    pub options: Vec<FieldOption>,
}

/// Operator identifiers per family
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OperatorSets {
    pub default: Vec<&'static str>,
    pub contain: Vec<&'static str>,
    pub is_logged_in: Vec<&'static str>,
    pub in_list: Vec<&'static str>,
}

/// Everything a form client needs to render the rule builder
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Vocabulary {
    pub conditions: Vec<FieldGroup>,
    pub operators: OperatorSets,
    /// Product-selection targets for the BOGO and buy-X-get-Y sub-forms
    pub product_targets: Vec<&'static str>,
}

/// Product-selection targets shared by the BOGO and buy-X-get-Y forms
pub const PRODUCT_TARGETS: &[&str] = &[
    "all_products",
    "product",
    "product_variation",
    "product_tags",
    "product_category",
    "product_price",
    "product_instock",
];

impl Vocabulary {
    pub fn new() -> Self {
        Self {
            conditions: condition_field_groups(),
            operators: OperatorSets {
                default: OperatorGroup::Default.operators().to_vec(),
                contain: OperatorGroup::Contain.operators().to_vec(),
                is_logged_in: OperatorGroup::IsLoggedIn.operators().to_vec(),
                in_list: OperatorGroup::InList.operators().to_vec(),
            },
            product_targets: PRODUCT_TARGETS.to_vec(),
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

/// Condition fields grouped the way the form presents them
pub fn condition_field_groups() -> Vec<FieldGroup> {
    vec![
        FieldGroup {
            label: "Cart",
            options: vec![
                FieldOption {
                    label: "Cart Subtotal Price",
                    value: ConditionField::CartSubtotalPrice,
                },
                FieldOption {
                    label: "Cart Quantity",
                    value: ConditionField::CartQuantity,
                },
                FieldOption {
                    label: "Cart Total Weight",
                    value: ConditionField::CartTotalWeight,
                },
            ],
        },
        FieldGroup {
            label: "Cart Items",
            options: vec![
                FieldOption {
                    label: "Cart Item - Product",
                    value: ConditionField::CartItemProduct,
                },
                FieldOption {
                    label: "Cart Item - Variation",
                    value: ConditionField::CartItemVariation,
                },
                FieldOption {
                    label: "Cart Item - Category",
                    value: ConditionField::CartItemCategory,
                },
                FieldOption {
                    label: "Cart Item - Tag",
                    value: ConditionField::CartItemTag,
                },
                FieldOption {
                    label: "Cart Item - Regular Price",
                    value: ConditionField::CartItemRegularPrice,
                },
            ],
        },
        FieldGroup {
            label: "Customer",
            options: vec![
                FieldOption {
                    label: "Customer Is Logged In",
                    value: ConditionField::CustomerIsLoggedIn,
                },
                FieldOption {
                    label: "Customer Role",
                    value: ConditionField::CustomerRole,
                },
                FieldOption {
                    label: "Specific Customer",
                    value: ConditionField::CustomerSpecific,
                },
            ],
        },
        FieldGroup {
            label: "Purchase History",
            options: vec![
                FieldOption {
                    label: "Customer Order Count",
                    value: ConditionField::CustomerOrderCount,
                },
                FieldOption {
                    label: "Order History Category",
                    value: ConditionField::CustomerOrderHistoryCategory,
                },
                FieldOption {
                    label: "Shipping Region",
                    value: ConditionField::CustomerShippingRegion,
                },
            ],
        },
        FieldGroup {
            label: "Others",
            options: vec![
                FieldOption {
                    label: "Payment Method",
                    value: ConditionField::PaymentMethod,
                },
                FieldOption {
                    label: "Applied Coupons",
                    value: ConditionField::AppliedCoupons,
                },
            ],
        },
    ]
}
