use crate::stores::{read_if_exists, write_atomically};
use base::entities::ShopId;
use base::errors::TrackerError;
use base::stores::FavoritesStore;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const FAVORITES_FILE_NAME: &str = "favorites.json";

/// Older favorites files hold the shop numbers as strings.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum StoredShopId {
    Number(ShopId),
    Text(String),
}

/// Favorite shop ids as a json array, in the order they were added.
#[derive(Debug, Clone)]
pub struct JsonFileFavoritesStore {
    path: PathBuf,
}

impl JsonFileFavoritesStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_list(&self) -> anyhow::Result<Vec<ShopId>> {
        let contents = match read_if_exists(&self.path)? {
            Some(contents) => contents,
            None => return Ok(Vec::new()),
        };

        let stored: Vec<StoredShopId> = serde_json::from_str(&contents)?;

        let mut favorites = Vec::new();
        for shop_id in stored {
            let shop_id = match shop_id {
                StoredShopId::Number(shop_id) => Some(shop_id),
                StoredShopId::Text(text) => text.trim().parse().ok(),
            };

            match shop_id {
                Some(shop_id) if shop_id > 0 && !favorites.contains(&shop_id) => {
                    favorites.push(shop_id)
                }
                Some(_) => {}
                None => log::warn!("skipping an invalid favorite shop in {:?}", self.path),
            }
        }

        Ok(favorites)
    }

    fn write(&self, favorites: &[ShopId]) -> Result<(), TrackerError> {
        let contents =
            serde_json::to_vec(favorites).map_err(|e| TrackerError::PersistenceWrite {
                path: self.path.clone(),
                source: e.into(),
            })?;

        write_atomically(&self.path, &contents)
    }
}

impl FavoritesStore for JsonFileFavoritesStore {
    fn list(&self) -> Vec<ShopId> {
        self.try_list().unwrap_or_else(|e| {
            log::warn!("couldn't read the favorites from {:?}: {:#}", self.path, e);
            Vec::new()
        })
    }

    fn add(&mut self, shop_id: ShopId) -> Result<bool, TrackerError> {
        if shop_id == 0 {
            return Err(TrackerError::InvalidInput(String::from(
                "shop id must be a positive integer",
            )));
        }

        let mut favorites = self.list();
        if favorites.contains(&shop_id) {
            return Ok(false);
        }

        favorites.push(shop_id);
        self.write(&favorites)?;

        Ok(true)
    }

    fn remove(&mut self, shop_id: ShopId) -> Result<bool, TrackerError> {
        let favorites = self.list();
        let remaining: Vec<ShopId> = favorites
            .iter()
            .copied()
            .filter(|favorite| *favorite != shop_id)
            .collect();

        if remaining.len() == favorites.len() {
            return Ok(false);
        }

        self.write(&remaining)?;

        Ok(true)
    }
}
