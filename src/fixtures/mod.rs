//! Sample pizzas for tests, demos and local development
//!
//! [`PizzaFactory`] builds valid random pizzas and lets any field be pinned.
//! [`PizzaStory`] fills a store with a fixed number of them.
//!
//! ```rust,ignore
//! let service = InMemoryPizzaService::new();
//! PizzaStory::new().build(&service).await?;
//!
//! let special = PizzaFactory::new()
//!     .with_name("invalid pizza")
//!     .with_special(true)
//!     .create_one(&service)
//!     .await?;
//! ```

use crate::core::entity::{Pizza, PizzaWrite};
use crate::core::service::PizzaService;
use crate::core::validation;
use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const STYLES: &[&str] = &[
    "Margherita",
    "Marinara",
    "Diavola",
    "Capricciosa",
    "Quattro Formaggi",
    "Quattro Stagioni",
    "Napoletana",
    "Calzone",
    "Bianca",
    "Ortolana",
    "Boscaiola",
    "Tonno",
];

const QUALIFIERS: &[&str] = &[
    "Classic", "Spicy", "Rustic", "Royal", "Smoky", "Golden", "Garden", "Midnight",
];

const INGREDIENTS: &[&str] = &[
    "Tomato",
    "Mozzarella",
    "Basil",
    "Oregano",
    "Garlic",
    "Salami",
    "Ham",
    "Mushrooms",
    "Artichokes",
    "Olives",
    "Anchovies",
    "Capers",
    "Gorgonzola",
    "Parmesan",
    "Rocket",
    "Onion",
    "Peppers",
    "Tuna",
    "Egg",
    "Chili oil",
];

/// Builds valid pizzas with random field values
pub struct PizzaFactory {
    rng: StdRng,
    name: Option<String>,
    ingredients: Option<Vec<String>>,
    oven_time_in_seconds: Option<Option<i64>>,
    special: Option<bool>,
    created_at: Option<DateTime<Utc>>,
}

impl PizzaFactory {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible sequence of pizzas
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            name: None,
            ingredients: None,
            oven_time_in_seconds: None,
            special: None,
            created_at: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = Some(ingredients.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_oven_time_in_seconds(mut self, seconds: Option<i64>) -> Self {
        self.oven_time_in_seconds = Some(seconds);
        self
    }

    pub fn with_special(mut self, special: bool) -> Self {
        self.special = Some(special);
        self
    }

    /// Stamp pizzas as created at `created_at` instead of the build instant
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Build one unsaved pizza
    pub fn build(&mut self, now: DateTime<Utc>) -> Pizza {
        let created_at = self.created_at.unwrap_or(now);
        let special = match self.special {
            Some(special) => special,
            None => self.rng.gen_bool(0.2),
        };

        let name = match &self.name {
            Some(name) => name.clone(),
            None => self.random_name(),
        };
        let ingredients = match &self.ingredients {
            Some(ingredients) => ingredients.clone(),
            None => self.random_ingredients(),
        };
        let oven_time_in_seconds = match self.oven_time_in_seconds {
            Some(seconds) => seconds,
            None => self.random_oven_time(),
        };

        let mut pizza = Pizza::new(special, created_at);
        pizza.apply(
            PizzaWrite::new()
                .name(name)
                .ingredients(ingredients)
                .oven_time_in_seconds(oven_time_in_seconds),
            created_at,
        );
        pizza
    }

    /// Build, validate and store one pizza
    pub async fn create_one(&mut self, service: &dyn PizzaService) -> Result<Pizza> {
        let pizza = self.build(Utc::now());
        validation::validate(&pizza)
            .map_err(|violations| anyhow!("Fixture pizza is invalid: {}", violations))?;
        service.create(pizza).await
    }

    /// Store `count` pizzas, in creation order
    pub async fn create_many(
        &mut self,
        service: &dyn PizzaService,
        count: usize,
    ) -> Result<Vec<Pizza>> {
        let mut created = Vec::with_capacity(count);
        for _ in 0..count {
            created.push(self.create_one(service).await?);
        }
        Ok(created)
    }

    fn random_name(&mut self) -> String {
        let qualifier = QUALIFIERS.choose(&mut self.rng).copied().unwrap_or("Classic");
        let style = STYLES.choose(&mut self.rng).copied().unwrap_or("Margherita");
        format!("{} {}", qualifier, style)
    }

    fn random_ingredients(&mut self) -> Vec<String> {
        let count = self.rng.gen_range(1..=6);
        INGREDIENTS
            .choose_multiple(&mut self.rng, count)
            .map(|i| i.to_string())
            .collect()
    }

    fn random_oven_time(&mut self) -> Option<i64> {
        if self.rng.gen_bool(0.1) {
            None
        } else {
            Some(self.rng.gen_range(60..=900))
        }
    }
}

impl Default for PizzaFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Fills a store with a batch of random pizzas
#[derive(Debug, Clone, Copy)]
pub struct PizzaStory {
    count: usize,
}

impl PizzaStory {
    pub const DEFAULT_COUNT: usize = 100;

    pub fn new() -> Self {
        Self {
            count: Self::DEFAULT_COUNT,
        }
    }

    pub fn with_count(count: usize) -> Self {
        Self { count }
    }

    pub async fn build(&self, service: &dyn PizzaService) -> Result<Vec<Pizza>> {
        let pizzas = PizzaFactory::new().create_many(service, self.count).await?;
        tracing::info!(count = pizzas.len(), "loaded pizza fixtures");
        Ok(pizzas)
    }
}

impl Default for PizzaStory {
    fn default() -> Self {
        Self::new()
    }
}
