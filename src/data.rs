//! Read-only reference data: species, moves, items and the type chart.
//!
//! The engine never mutates these records. A [`ReferenceData`] handle is passed to
//! constructors and to the battle, so tests can build small in-memory stores
//! while the binary loads the bundled RON files.

use crate::errors::{ReferenceDataError, ReferenceDataResult};
use schema::{ItemData, MoveCategory, MoveData, PokemonSpecies, PokemonType};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

pub trait ReferenceData: Send + Sync {
    fn species(&self, name: &str) -> ReferenceDataResult<&PokemonSpecies>;

    fn move_data(&self, name: &str) -> ReferenceDataResult<&MoveData>;

    fn item(&self, name: &str) -> ReferenceDataResult<&ItemData>;

    fn type_effectiveness(&self, attacking: PokemonType, defending: PokemonType) -> f64 {
        PokemonType::type_effectiveness(attacking, defending) as f64
    }
}

/// In-memory store keyed by upper-cased record name.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    species: HashMap<String, PokemonSpecies>,
    moves: HashMap<String, MoveData>,
    items: HashMap<String, ItemData>,
}

fn key(name: &str) -> String {
    name.to_uppercase()
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `species.ron`, `moves.ron` and `items.ron` from `data_path`.
    pub fn load(data_path: &Path) -> ReferenceDataResult<Self> {
        let read = |file: &str| {
            let path = data_path.join(file);
            fs::read_to_string(&path).map_err(|source| ReferenceDataError::Io { path, source })
        };
        let store = Self::from_ron_strs(
            &read("species.ron")?,
            &read("moves.ron")?,
            &read("items.ron")?,
        )?;
        debug!(
            species = store.species.len(),
            moves = store.moves.len(),
            items = store.items.len(),
            "loaded reference data from {}",
            data_path.display()
        );
        Ok(store)
    }

    pub fn from_ron_strs(species: &str, moves: &str, items: &str) -> ReferenceDataResult<Self> {
        let species: Vec<PokemonSpecies> = parse("species", species)?;
        let moves: Vec<MoveData> = parse("moves", moves)?;
        let items: Vec<ItemData> = parse("items", items)?;

        let mut store = Self::new();
        for move_data in moves {
            store.insert_move(move_data)?;
        }
        for item in items {
            store.insert_item(item);
        }
        for entry in species {
            store.insert_species(entry)?;
        }
        Ok(store)
    }

    /// Every learnset move must already be in the store, so insert moves first.
    pub fn insert_species(&mut self, species: PokemonSpecies) -> ReferenceDataResult<()> {
        if species.types.is_empty() || species.types.len() > 2 {
            return Err(ReferenceDataError::MalformedData(format!(
                "{} must have one or two types",
                species.name
            )));
        }
        if let Some((level, move_name)) = species
            .learnset
            .iter()
            .find(|(_, move_name)| !self.moves.contains_key(&key(move_name)))
        {
            return Err(ReferenceDataError::MalformedData(format!(
                "{} learns unknown move {} at level {}",
                species.name, move_name, level
            )));
        }
        self.species.insert(key(&species.name), species);
        Ok(())
    }

    pub fn insert_move(&mut self, move_data: MoveData) -> ReferenceDataResult<()> {
        if move_data.category != MoveCategory::Status && move_data.power.is_none() {
            return Err(ReferenceDataError::MalformedData(format!(
                "damaging move {} has no power",
                move_data.name
            )));
        }
        self.moves.insert(key(&move_data.name), move_data);
        Ok(())
    }

    pub fn insert_item(&mut self, item: ItemData) {
        self.items.insert(key(&item.name), item);
    }
}

fn parse<T: serde::de::DeserializeOwned>(origin: &str, source: &str) -> ReferenceDataResult<T> {
    ron::from_str(source).map_err(|source| ReferenceDataError::Parse {
        origin: origin.to_string(),
        source,
    })
}

impl ReferenceData for DataStore {
    fn species(&self, name: &str) -> ReferenceDataResult<&PokemonSpecies> {
        self.species
            .get(&key(name))
            .ok_or_else(|| ReferenceDataError::SpeciesNotFound(name.to_string()))
    }

    fn move_data(&self, name: &str) -> ReferenceDataResult<&MoveData> {
        self.moves
            .get(&key(name))
            .ok_or_else(|| ReferenceDataError::MoveNotFound(name.to_string()))
    }

    fn item(&self, name: &str) -> ReferenceDataResult<&ItemData> {
        self.items
            .get(&key(name))
            .ok_or_else(|| ReferenceDataError::ItemNotFound(name.to_string()))
    }
}
