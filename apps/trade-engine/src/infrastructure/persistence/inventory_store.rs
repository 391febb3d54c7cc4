//! In-memory inventory store.
//!
//! Single-process adapter over the inventory ports. All tables live
//! behind one async mutex: every mutation, including the privileged
//! swap, observes and produces a fully consistent state. Lock waits are
//! bounded; a caller that cannot get the lock in time gets `Conflict`
//! instead of queueing forever.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, MutexGuard};

use crate::application::ports::{
    InventoryStore, InventoryTransfer, PokemonFilter, SwapError, SwapPlan,
};
use crate::domain::inventory::aggregate::{CreatePokemonCommand, Pokemon, PokemonBox, PokemonPatch};
use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::value_objects::OwnedPokemon;
use crate::domain::shared::{BoxId, Page, PokemonId, TrainerId};

/// What happens when a trainer deletes a box that still holds
/// creatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxDeletionPolicy {
    /// Refuse the deletion with `BoxNotEmpty`.
    #[default]
    RejectIfNotEmpty,
    /// Delete the box and every creature inside it.
    CascadeDelete,
}

#[derive(Debug, Clone)]
struct BoxRow {
    pokemon_box: PokemonBox,
    seq: u64,
}

#[derive(Debug, Clone)]
struct PokemonRow {
    pokemon: Pokemon,
    seq: u64,
}

#[derive(Debug, Default)]
struct Tables {
    boxes: HashMap<BoxId, BoxRow>,
    pokemons: HashMap<PokemonId, PokemonRow>,
    next_seq: u64,
}

impl Tables {
    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Derive a creature's owner through its box. A dangling box
    /// reference is a corruption the store itself can never produce.
    fn owner_of(&self, pokemon: &Pokemon) -> Result<&TrainerId, InventoryError> {
        self.boxes
            .get(pokemon.box_id())
            .map(|row| row.pokemon_box.owner_id())
            .ok_or_else(|| InventoryError::Storage {
                message: format!(
                    "creature {} references missing box {}",
                    pokemon.id(),
                    pokemon.box_id()
                ),
            })
    }

    fn occupants_of(&self, box_id: &BoxId) -> Vec<PokemonId> {
        self.pokemons
            .values()
            .filter(|row| row.pokemon.box_id() == box_id)
            .map(|row| row.pokemon.id().clone())
            .collect()
    }
}

/// In-memory implementation of `InventoryStore` and
/// `InventoryTransfer`.
#[derive(Debug)]
pub struct InMemoryInventoryStore {
    tables: Mutex<Tables>,
    deletion_policy: BoxDeletionPolicy,
    lock_wait: Duration,
}

impl Default for InMemoryInventoryStore {
    fn default() -> Self {
        Self::new(BoxDeletionPolicy::default(), Duration::from_secs(2))
    }
}

impl InMemoryInventoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(deletion_policy: BoxDeletionPolicy, lock_wait: Duration) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            deletion_policy,
            lock_wait,
        }
    }

    async fn lock(&self) -> Result<MutexGuard<'_, Tables>, InventoryError> {
        tokio::time::timeout(self.lock_wait, self.tables.lock())
            .await
            .map_err(|_| InventoryError::Conflict {
                message: "inventory lock wait timed out".to_string(),
            })
    }

    fn box_owned_by<'t>(
        tables: &'t Tables,
        box_id: &BoxId,
        caller: &TrainerId,
    ) -> Result<&'t BoxRow, InventoryError> {
        let row = tables
            .boxes
            .get(box_id)
            .ok_or_else(|| InventoryError::NotFound {
                entity: "box".to_string(),
                id: box_id.to_string(),
            })?;
        if !row.pokemon_box.is_owned_by(caller) {
            return Err(InventoryError::NotOwner {
                entity: "box".to_string(),
                id: box_id.to_string(),
                caller: caller.to_string(),
            });
        }
        Ok(row)
    }

    fn pokemon_owned_by<'t>(
        tables: &'t Tables,
        pokemon_id: &PokemonId,
        caller: &TrainerId,
    ) -> Result<&'t PokemonRow, InventoryError> {
        let row = tables
            .pokemons
            .get(pokemon_id)
            .ok_or_else(|| InventoryError::NotFound {
                entity: "pokemon".to_string(),
                id: pokemon_id.to_string(),
            })?;
        if tables.owner_of(&row.pokemon)? != caller {
            return Err(InventoryError::NotOwner {
                entity: "pokemon".to_string(),
                id: pokemon_id.to_string(),
                caller: caller.to_string(),
            });
        }
        Ok(row)
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn create_box(
        &self,
        owner_id: &TrainerId,
        name: &str,
    ) -> Result<PokemonBox, InventoryError> {
        let created = PokemonBox::new(owner_id.clone(), name)?;
        let mut tables = self.lock().await?;
        let seq = tables.next_seq();
        tables.boxes.insert(
            created.id().clone(),
            BoxRow {
                pokemon_box: created.clone(),
                seq,
            },
        );
        Ok(created)
    }

    async fn rename_box(
        &self,
        box_id: &BoxId,
        caller_id: &TrainerId,
        new_name: &str,
    ) -> Result<PokemonBox, InventoryError> {
        let mut tables = self.lock().await?;
        Self::box_owned_by(&tables, box_id, caller_id)?;
        let row = tables
            .boxes
            .get_mut(box_id)
            .ok_or_else(|| InventoryError::NotFound {
                entity: "box".to_string(),
                id: box_id.to_string(),
            })?;
        row.pokemon_box.rename(new_name)?;
        Ok(row.pokemon_box.clone())
    }

    async fn delete_box(
        &self,
        box_id: &BoxId,
        caller_id: &TrainerId,
    ) -> Result<(), InventoryError> {
        let mut tables = self.lock().await?;
        Self::box_owned_by(&tables, box_id, caller_id)?;

        let occupants = tables.occupants_of(box_id);
        if !occupants.is_empty() {
            match self.deletion_policy {
                BoxDeletionPolicy::RejectIfNotEmpty => {
                    return Err(InventoryError::BoxNotEmpty {
                        box_id: box_id.to_string(),
                        occupants: occupants.len(),
                    });
                }
                BoxDeletionPolicy::CascadeDelete => {
                    for id in &occupants {
                        tables.pokemons.remove(id);
                    }
                    tracing::info!(
                        box_id = %box_id,
                        released = occupants.len(),
                        "cascade box deletion"
                    );
                }
            }
        }
        tables.boxes.remove(box_id);
        Ok(())
    }

    async fn get_box(&self, box_id: &BoxId) -> Result<Option<PokemonBox>, InventoryError> {
        let tables = self.lock().await?;
        Ok(tables.boxes.get(box_id).map(|row| row.pokemon_box.clone()))
    }

    async fn list_boxes(&self, owner_id: &TrainerId) -> Result<Vec<PokemonBox>, InventoryError> {
        let tables = self.lock().await?;
        let mut rows: Vec<&BoxRow> = tables
            .boxes
            .values()
            .filter(|row| row.pokemon_box.is_owned_by(owner_id))
            .collect();
        rows.sort_by_key(|row| row.seq);
        Ok(rows.into_iter().map(|row| row.pokemon_box.clone()).collect())
    }

    async fn create_pokemon(
        &self,
        box_id: &BoxId,
        caller_id: &TrainerId,
        cmd: CreatePokemonCommand,
    ) -> Result<Pokemon, InventoryError> {
        let mut tables = self.lock().await?;
        Self::box_owned_by(&tables, box_id, caller_id)?;
        let created = Pokemon::new(box_id.clone(), cmd)?;
        let seq = tables.next_seq();
        tables.pokemons.insert(
            created.id().clone(),
            PokemonRow {
                pokemon: created.clone(),
                seq,
            },
        );
        Ok(created)
    }

    async fn update_pokemon(
        &self,
        pokemon_id: &PokemonId,
        caller_id: &TrainerId,
        patch: PokemonPatch,
    ) -> Result<Pokemon, InventoryError> {
        let mut tables = self.lock().await?;
        Self::pokemon_owned_by(&tables, pokemon_id, caller_id)?;
        let row = tables
            .pokemons
            .get_mut(pokemon_id)
            .ok_or_else(|| InventoryError::NotFound {
                entity: "pokemon".to_string(),
                id: pokemon_id.to_string(),
            })?;
        row.pokemon.apply_patch(patch)?;
        Ok(row.pokemon.clone())
    }

    async fn move_pokemon(
        &self,
        pokemon_id: &PokemonId,
        caller_id: &TrainerId,
        destination: &BoxId,
    ) -> Result<Pokemon, InventoryError> {
        let mut tables = self.lock().await?;
        Self::pokemon_owned_by(&tables, pokemon_id, caller_id)?;
        // Same-trainer moves only; cross-trainer transfer is the trade
        // executor's privilege.
        Self::box_owned_by(&tables, destination, caller_id)?;
        let row = tables
            .pokemons
            .get_mut(pokemon_id)
            .ok_or_else(|| InventoryError::NotFound {
                entity: "pokemon".to_string(),
                id: pokemon_id.to_string(),
            })?;
        row.pokemon.relocate(destination.clone());
        Ok(row.pokemon.clone())
    }

    async fn delete_pokemon(
        &self,
        pokemon_id: &PokemonId,
        caller_id: &TrainerId,
    ) -> Result<(), InventoryError> {
        let mut tables = self.lock().await?;
        Self::pokemon_owned_by(&tables, pokemon_id, caller_id)?;
        tables.pokemons.remove(pokemon_id);
        Ok(())
    }

    async fn get_pokemon(
        &self,
        pokemon_id: &PokemonId,
    ) -> Result<Option<OwnedPokemon>, InventoryError> {
        let tables = self.lock().await?;
        match tables.pokemons.get(pokemon_id) {
            Some(row) => {
                let owner = tables.owner_of(&row.pokemon)?.clone();
                Ok(Some(OwnedPokemon::new(row.pokemon.clone(), owner)))
            }
            None => Ok(None),
        }
    }

    async fn list_pokemons_of_box(&self, box_id: &BoxId) -> Result<Vec<Pokemon>, InventoryError> {
        let tables = self.lock().await?;
        if !tables.boxes.contains_key(box_id) {
            return Err(InventoryError::NotFound {
                entity: "box".to_string(),
                id: box_id.to_string(),
            });
        }
        let mut rows: Vec<&PokemonRow> = tables
            .pokemons
            .values()
            .filter(|row| row.pokemon.box_id() == box_id)
            .collect();
        rows.sort_by_key(|row| row.seq);
        Ok(rows.into_iter().map(|row| row.pokemon.clone()).collect())
    }

    async fn list_pokemons_of_trainer(
        &self,
        trainer_id: &TrainerId,
    ) -> Result<Vec<OwnedPokemon>, InventoryError> {
        let tables = self.lock().await?;
        let mut rows: Vec<&PokemonRow> = Vec::new();
        for row in tables.pokemons.values() {
            if tables.owner_of(&row.pokemon)? == trainer_id {
                rows.push(row);
            }
        }
        rows.sort_by_key(|row| row.seq);
        Ok(rows
            .into_iter()
            .map(|row| OwnedPokemon::new(row.pokemon.clone(), trainer_id.clone()))
            .collect())
    }

    async fn search_pokemons(
        &self,
        filter: &PokemonFilter,
        page: Page,
    ) -> Result<Vec<OwnedPokemon>, InventoryError> {
        let tables = self.lock().await?;
        let mut rows: Vec<&PokemonRow> = tables
            .pokemons
            .values()
            .filter(|row| filter.matches(&row.pokemon))
            .collect();
        // Insertion order is the stable pagination key.
        rows.sort_by_key(|row| row.seq);

        let mut out = Vec::new();
        for row in page.slice(rows) {
            let owner = tables.owner_of(&row.pokemon)?.clone();
            out.push(OwnedPokemon::new(row.pokemon.clone(), owner));
        }
        Ok(out)
    }
}

#[async_trait]
impl InventoryTransfer for InMemoryInventoryStore {
    async fn execute_swap(&self, plan: &SwapPlan) -> Result<(), SwapError> {
        let mut tables = tokio::time::timeout(self.lock_wait, self.tables.lock())
            .await
            .map_err(|_| SwapError::Conflict("inventory lock wait timed out".to_string()))?;

        // Validate every transfer before touching anything; the swap is
        // all-or-nothing.
        for transfer in &plan.transfers {
            let row = tables.pokemons.get(&transfer.pokemon_id).ok_or_else(|| {
                SwapError::StaleInventory {
                    pokemon_id: transfer.pokemon_id.to_string(),
                    expected_owner: transfer.expected_owner.to_string(),
                }
            })?;
            let owner = tables
                .owner_of(&row.pokemon)
                .map_err(|e| SwapError::Storage(e.to_string()))?;
            if owner != &transfer.expected_owner {
                return Err(SwapError::StaleInventory {
                    pokemon_id: transfer.pokemon_id.to_string(),
                    expected_owner: transfer.expected_owner.to_string(),
                });
            }
            if !tables.boxes.contains_key(&transfer.destination) {
                return Err(SwapError::MissingDestination {
                    box_id: transfer.destination.to_string(),
                });
            }
        }

        for transfer in &plan.transfers {
            if let Some(row) = tables.pokemons.get_mut(&transfer.pokemon_id) {
                row.pokemon.relocate(transfer.destination.clone());
            }
        }

        tracing::info!(
            trade_id = %plan.trade_id,
            transfers = plan.transfers.len(),
            "ownership swap applied"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::PlannedTransfer;
    use crate::domain::inventory::value_objects::Gender;
    use crate::domain::shared::TradeId;

    fn cmd(species: &str) -> CreatePokemonCommand {
        CreatePokemonCommand {
            species: species.to_string(),
            name: None,
            level: 10,
            gender: Gender::NotDefined,
            is_shiny: false,
            size: None,
            weight: None,
        }
    }

    fn store() -> InMemoryInventoryStore {
        InMemoryInventoryStore::default()
    }

    #[tokio::test]
    async fn owner_is_derived_from_box() {
        let store = store();
        let ash = TrainerId::new("ash");
        let b = store.create_box(&ash, "Inbox").await.unwrap();
        let p = store.create_pokemon(b.id(), &ash, cmd("Pikachu")).await.unwrap();

        let owned = store.get_pokemon(p.id()).await.unwrap().unwrap();
        assert_eq!(owned.owner_id, ash);
    }

    #[tokio::test]
    async fn create_in_foreign_box_rejected() {
        let store = store();
        let ash = TrainerId::new("ash");
        let misty = TrainerId::new("misty");
        let b = store.create_box(&ash, "Inbox").await.unwrap();

        let err = store
            .create_pokemon(b.id(), &misty, cmd("Staryu"))
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::NotOwner { .. }));
    }

    #[tokio::test]
    async fn move_to_foreign_box_rejected() {
        let store = store();
        let ash = TrainerId::new("ash");
        let misty = TrainerId::new("misty");
        let mine = store.create_box(&ash, "Inbox").await.unwrap();
        let theirs = store.create_box(&misty, "Inbox").await.unwrap();
        let p = store.create_pokemon(mine.id(), &ash, cmd("Pikachu")).await.unwrap();

        let err = store
            .move_pokemon(p.id(), &ash, theirs.id())
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::NotOwner { .. }));

        // The creature did not move.
        let owned = store.get_pokemon(p.id()).await.unwrap().unwrap();
        assert_eq!(owned.pokemon.box_id(), mine.id());
    }

    #[tokio::test]
    async fn same_trainer_move_succeeds() {
        let store = store();
        let ash = TrainerId::new("ash");
        let a = store.create_box(&ash, "A").await.unwrap();
        let b = store.create_box(&ash, "B").await.unwrap();
        let p = store.create_pokemon(a.id(), &ash, cmd("Pikachu")).await.unwrap();

        let moved = store.move_pokemon(p.id(), &ash, b.id()).await.unwrap();
        assert_eq!(moved.box_id(), b.id());
    }

    #[tokio::test]
    async fn reject_policy_blocks_non_empty_box_deletion() {
        let store = store();
        let ash = TrainerId::new("ash");
        let b = store.create_box(&ash, "Inbox").await.unwrap();
        store.create_pokemon(b.id(), &ash, cmd("Pikachu")).await.unwrap();

        let err = store.delete_box(b.id(), &ash).await.unwrap_err();
        assert!(matches!(err, InventoryError::BoxNotEmpty { occupants: 1, .. }));
        assert!(store.get_box(b.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn cascade_policy_deletes_occupants() {
        let store =
            InMemoryInventoryStore::new(BoxDeletionPolicy::CascadeDelete, Duration::from_secs(2));
        let ash = TrainerId::new("ash");
        let b = store.create_box(&ash, "Inbox").await.unwrap();
        let p = store.create_pokemon(b.id(), &ash, cmd("Pikachu")).await.unwrap();

        store.delete_box(b.id(), &ash).await.unwrap();
        assert!(store.get_box(b.id()).await.unwrap().is_none());
        assert!(store.get_pokemon(p.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn boxes_list_in_creation_order() {
        let store = store();
        let ash = TrainerId::new("ash");
        let first = store.create_box(&ash, "First").await.unwrap();
        let second = store.create_box(&ash, "Second").await.unwrap();

        let boxes = store.list_boxes(&ash).await.unwrap();
        assert_eq!(
            boxes.iter().map(|b| b.id().clone()).collect::<Vec<_>>(),
            vec![first.id().clone(), second.id().clone()]
        );
    }

    #[tokio::test]
    async fn search_pages_never_overlap() {
        let store = store();
        let ash = TrainerId::new("ash");
        let b = store.create_box(&ash, "Inbox").await.unwrap();
        for i in 0..5 {
            store
                .create_pokemon(b.id(), &ash, cmd(&format!("Species{i}")))
                .await
                .unwrap();
        }

        let filter = PokemonFilter::default();
        let first = store
            .search_pokemons(&filter, Page::new(0, 2).unwrap())
            .await
            .unwrap();
        let second = store
            .search_pokemons(&filter, Page::new(1, 2).unwrap())
            .await
            .unwrap();
        let third = store
            .search_pokemons(&filter, Page::new(2, 2).unwrap())
            .await
            .unwrap();

        let mut ids: Vec<String> = first
            .iter()
            .chain(&second)
            .chain(&third)
            .map(|o| o.pokemon.id().to_string())
            .collect();
        assert_eq!(ids.len(), 5);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[tokio::test]
    async fn swap_transfers_ownership_atomically() {
        let store = store();
        let ash = TrainerId::new("ash");
        let misty = TrainerId::new("misty");
        let ash_box = store.create_box(&ash, "Inbox").await.unwrap();
        let misty_box = store.create_box(&misty, "Inbox").await.unwrap();
        let p1 = store.create_pokemon(ash_box.id(), &ash, cmd("Pikachu")).await.unwrap();
        let p2 = store.create_pokemon(misty_box.id(), &misty, cmd("Staryu")).await.unwrap();

        let plan = SwapPlan {
            trade_id: TradeId::new("trade-1"),
            transfers: vec![
                PlannedTransfer {
                    pokemon_id: p1.id().clone(),
                    expected_owner: ash.clone(),
                    destination: misty_box.id().clone(),
                },
                PlannedTransfer {
                    pokemon_id: p2.id().clone(),
                    expected_owner: misty.clone(),
                    destination: ash_box.id().clone(),
                },
            ],
        };
        store.execute_swap(&plan).await.unwrap();

        assert_eq!(store.get_pokemon(p1.id()).await.unwrap().unwrap().owner_id, misty);
        assert_eq!(store.get_pokemon(p2.id()).await.unwrap().unwrap().owner_id, ash);
    }

    #[tokio::test]
    async fn stale_expectation_aborts_whole_swap() {
        let store = store();
        let ash = TrainerId::new("ash");
        let misty = TrainerId::new("misty");
        let ash_box = store.create_box(&ash, "Inbox").await.unwrap();
        let misty_box = store.create_box(&misty, "Inbox").await.unwrap();
        let p1 = store.create_pokemon(ash_box.id(), &ash, cmd("Pikachu")).await.unwrap();
        let p2 = store.create_pokemon(misty_box.id(), &misty, cmd("Staryu")).await.unwrap();

        // The offered creature was released before execution.
        store.delete_pokemon(p1.id(), &ash).await.unwrap();

        let plan = SwapPlan {
            trade_id: TradeId::new("trade-1"),
            transfers: vec![
                PlannedTransfer {
                    pokemon_id: p1.id().clone(),
                    expected_owner: ash.clone(),
                    destination: misty_box.id().clone(),
                },
                PlannedTransfer {
                    pokemon_id: p2.id().clone(),
                    expected_owner: misty.clone(),
                    destination: ash_box.id().clone(),
                },
            ],
        };
        let err = store.execute_swap(&plan).await.unwrap_err();
        assert!(matches!(err, SwapError::StaleInventory { .. }));

        // The other side stayed put.
        assert_eq!(store.get_pokemon(p2.id()).await.unwrap().unwrap().owner_id, misty);
    }

    #[tokio::test]
    async fn missing_destination_is_not_stale_inventory() {
        let store = store();
        let ash = TrainerId::new("ash");
        let b = store.create_box(&ash, "Inbox").await.unwrap();
        let p = store.create_pokemon(b.id(), &ash, cmd("Pikachu")).await.unwrap();

        let plan = SwapPlan {
            trade_id: TradeId::new("trade-1"),
            transfers: vec![PlannedTransfer {
                pokemon_id: p.id().clone(),
                expected_owner: ash.clone(),
                destination: BoxId::new("nonexistent"),
            }],
        };
        let err = store.execute_swap(&plan).await.unwrap_err();
        assert!(matches!(err, SwapError::MissingDestination { .. }));
    }
}
