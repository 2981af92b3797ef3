use serde::{Deserialize, Serialize};

use farmstand_core::Money;

/// A fulfillment method with a flat fee.
///
/// This is a static, enumerated set: the farm's pickup points are part of
/// the configuration, not user-editable data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupOption {
    FarmersMarket,
    FarmPickup,
    LockerDowntown,
    LockerShopping,
}

impl PickupOption {
    pub const ALL: [PickupOption; 4] = [
        PickupOption::FarmersMarket,
        PickupOption::FarmPickup,
        PickupOption::LockerDowntown,
        PickupOption::LockerShopping,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            PickupOption::FarmersMarket => "Farmers Market",
            PickupOption::FarmPickup => "Farm Pickup",
            PickupOption::LockerDowntown => "Downtown Locker",
            PickupOption::LockerShopping => "Shopping Center Locker",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PickupOption::FarmersMarket => "Saturday 3:00 PM - 6:00 PM",
            PickupOption::FarmPickup => "By appointment (24hr notice)",
            PickupOption::LockerDowntown => "24/7 access with code",
            PickupOption::LockerShopping => "24/7 access with code",
        }
    }

    pub fn location(self) -> &'static str {
        match self {
            PickupOption::FarmersMarket => "Local Farmers Market",
            PickupOption::FarmPickup => "LMW Farm",
            PickupOption::LockerDowntown => "Downtown Business District",
            PickupOption::LockerShopping => "Main Shopping Center",
        }
    }

    /// Flat fee added once per order, independent of line items.
    pub fn fee(self) -> Money {
        match self {
            PickupOption::FarmersMarket | PickupOption::FarmPickup => Money::ZERO,
            PickupOption::LockerDowntown | PickupOption::LockerShopping => Money::from_cents(50),
        }
    }
}

/// How the customer intends to pay. Settlement happens offline; this is
/// recorded on the confirmation so the farm can follow up.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Venmo,
    /// Anything else; details go in the order notes.
    Other,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Venmo => "Venmo",
            PaymentMethod::Other => "other",
        }
    }
}
