//! Shop domain — purchase validation and the atomic buy transaction.
//!
//! A purchase is all-or-nothing from the player's perspective:
//!
//!   1. validate — the item exists, is unlocked, under its purchase limit,
//!      and the full multi-resource cost is affordable;
//!   2. spend — every cost line is deducted in one atomic call;
//!   3. effect — place a decoration, grant resources, or a reserved
//!      future effect that succeeds as a no-op;
//!   4. commit — bump the purchase count, re-evaluate prerequisite unlocks,
//!      announce the purchase.
//!
//! If the effect fails after the spend (a resource grant can hit the
//! inventory ceiling), every spent line item is refunded before the failure
//! is reported. The refund re-adds exactly what was just deducted, so it
//! cannot itself be rejected.

use bevy::prelude::*;

use crate::shared::*;

pub struct ShopPlugin;

impl Plugin for ShopPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_purchase.run_if(in_state(GameState::Playing)));
    }
}

/// Refunds a spent cost line-by-line. Amounts return to their pre-spend
/// levels, so neither ceiling can reject them.
fn refund(inventory: &mut Inventory, registry: &ResourceRegistry, cost: &ResourceCost) {
    for line in &cost.lines {
        let max_stack = registry.max_stack(line.resource_type);
        let _ = inventory.add(line.resource_type, line.amount, max_stack);
    }
}

fn handle_purchase(
    mut requests: EventReader<PurchaseRequestEvent>,
    mut catalog: ResMut<ShopCatalog>,
    mut inventory: ResMut<Inventory>,
    registry: Res<ResourceRegistry>,
    mut place_writer: EventWriter<PlaceDecorationEvent>,
    mut purchased_writer: EventWriter<ItemPurchasedEvent>,
    mut failed_writer: EventWriter<PurchaseFailedEvent>,
    mut changed_writer: EventWriter<ResourceChangedEvent>,
    mut gained_writer: EventWriter<ResourceGainedEvent>,
) {
    for ev in requests.read() {
        let Some(item) = catalog.get(&ev.item_id) else {
            warn!("[Shop] Purchase failed — unknown item '{}'", ev.item_id);
            failed_writer.send(PurchaseFailedEvent {
                item_id: None,
                reason: "Item not found".into(),
            });
            continue;
        };

        if !item.can_purchase() {
            let reason = if item.is_maxed_out() {
                "Purchase limit reached"
            } else {
                "Item is locked"
            };
            info!("[Shop] Purchase failed — '{}': {}", item.id, reason);
            failed_writer.send(PurchaseFailedEvent {
                item_id: Some(item.id.clone()),
                reason: reason.into(),
            });
            continue;
        }

        if !item.cost.can_afford(&inventory) {
            info!("[Shop] Purchase failed — cannot afford '{}'", item.id);
            failed_writer.send(PurchaseFailedEvent {
                item_id: Some(item.id.clone()),
                reason: "Cannot afford this item".into(),
            });
            continue;
        }

        let cost = item.cost.clone();
        let effect = item.effect;
        let item_id = item.id.clone();
        let display_name = item.display_name.clone();

        // Affordability was checked against this same single-threaded state,
        // so the spend cannot fail here; treat a failure as a defensive abort.
        if !inventory.spend(&cost) {
            warn!("[Shop] Spend unexpectedly failed for '{}'", item_id);
            failed_writer.send(PurchaseFailedEvent {
                item_id: Some(item_id),
                reason: "Failed to spend resources".into(),
            });
            continue;
        }
        for line in &cost.lines {
            changed_writer.send(ResourceChangedEvent {
                resource_type: line.resource_type,
                new_amount: inventory.amount_of(line.resource_type),
            });
        }

        // Execute the effect. A failure refunds the full cost.
        let effect_ok = match effect {
            ShopEffect::Decoration(kind) => {
                // Any DecorationKind is placeable; placement itself cannot
                // fail downstream.
                place_writer.send(PlaceDecorationEvent {
                    kind,
                    position: None,
                });
                true
            }
            ShopEffect::ResourceGrant {
                resource_type,
                amount,
            } => {
                let max_stack = registry.max_stack(resource_type);
                match inventory.add(resource_type, amount, max_stack) {
                    Some(applied) => {
                        changed_writer.send(ResourceChangedEvent {
                            resource_type,
                            new_amount: inventory.amount_of(resource_type),
                        });
                        gained_writer.send(ResourceGainedEvent {
                            resource_type,
                            amount: applied,
                        });
                        true
                    }
                    None => false,
                }
            }
            // Reserved for future phases.
            ShopEffect::ToolUpgrade
            | ShopEffect::CapacityUpgrade
            | ShopEffect::Multiplier
            | ShopEffect::Unlock
            | ShopEffect::Consumable => true,
        };

        if !effect_ok {
            refund(&mut inventory, &registry, &cost);
            for line in &cost.lines {
                changed_writer.send(ResourceChangedEvent {
                    resource_type: line.resource_type,
                    new_amount: inventory.amount_of(line.resource_type),
                });
            }
            info!("[Shop] Effect failed for '{}' — cost refunded", item_id);
            failed_writer.send(PurchaseFailedEvent {
                item_id: Some(item_id),
                reason: "Failed to execute purchase".into(),
            });
            continue;
        }

        if let Some(item) = catalog.get_mut(&item_id) {
            item.purchase_count += 1;
        }
        catalog.refresh_unlocks();

        info!("[Shop] Purchased {}", display_name);
        purchased_writer.send(ItemPurchasedEvent { item_id });
    }
}
