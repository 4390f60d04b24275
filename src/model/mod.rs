pub mod inventory;
pub mod item;

pub use inventory::{effective_inventory, round_inventory, InventoryRounding};
pub use item::{FleetItem, ItemDemandProfile, ItemRecord, SlotInventory};
