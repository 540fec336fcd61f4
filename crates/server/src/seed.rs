//! Demo data seeding.
//!
//! Runs at startup when the store is empty. The memory backend starts empty
//! on every boot; a relational backend is only seeded once.

use fashionzone_core::{NewNotification, NewProduct, NewUser, Price, PriceError, Username};
use tracing::info;

use crate::services::auth::{AuthError, hash_password};
use crate::store::{Storage, StorageError};

pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_PASSWORD: &str = "password123";

const WELCOME_MESSAGE: &str = "Welcome to FashionZone! Explore our new summer collection.";

#[derive(thiserror::Error, Debug)]
pub enum SeedError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Price(#[from] PriceError),
    #[error("invalid seed username: {0}")]
    Username(#[from] fashionzone_core::UsernameError),
}

/// Seed the catalog and a demo account if the store is empty.
///
/// # Errors
///
/// Returns an error if any seed row fails to insert.
pub async fn seed_if_empty(store: &dyn Storage) -> Result<(), SeedError> {
    if !store.has_products().await? {
        for product in catalog()? {
            store.create_product(product).await?;
        }
        info!("seeded product catalog");
    }

    if !store.has_users().await? {
        let user = store
            .create_user(NewUser {
                username: Username::parse(DEMO_USERNAME)?,
                password: hash_password(DEMO_PASSWORD)?,
            })
            .await?;
        store
            .add_notification(NewNotification {
                user_id: user.id,
                message: WELCOME_MESSAGE.to_owned(),
                read: false,
            })
            .await?;
        info!(username = DEMO_USERNAME, "seeded demo account");
    }

    Ok(())
}

fn catalog() -> Result<Vec<NewProduct>, PriceError> {
    let entries: &[(&str, i32, &str, &str, &str, &str, &[&str])] = &[
        (
            "Summer Floral Dress",
            5999,
            "Elegant white summer dress with floral pattern",
            "https://images.unsplash.com/photo-1515886657613-9f3515b0c78f?w=600&h=800&fit=crop",
            "dresses",
            "women",
            &["XS", "S", "M", "L", "XL"],
        ),
        (
            "Denim Casual Shirt",
            4599,
            "Classic denim shirt for a casual look",
            "https://images.unsplash.com/photo-1589310243389-96a5483213a8?w=600&h=800&fit=crop",
            "shirts",
            "men",
            &["S", "M", "L", "XL", "2XL"],
        ),
        (
            "Leather Biker Jacket",
            8999,
            "Premium black leather jacket for a bold look",
            "https://images.unsplash.com/photo-1591047139829-d91aecb6caea?w=600&h=800&fit=crop",
            "jackets",
            "women",
            &["S", "M", "L"],
        ),
        (
            "Classic White Sneakers",
            6599,
            "Comfortable casual sneakers for everyday wear",
            "https://images.unsplash.com/photo-1525966222134-fcfa99b8ae77?w=600&h=800&fit=crop",
            "shoes",
            "men",
            &["40", "41", "42", "43", "44", "45"],
        ),
        (
            "Slim Fit T-Shirt",
            2499,
            "Comfortable slim fit t-shirt for everyday wear",
            "https://images.unsplash.com/photo-1581655353564-df123a1eb820?w=600&h=800&fit=crop",
            "tshirts",
            "men",
            &["S", "M", "L", "XL"],
        ),
        (
            "High Waist Jeans",
            3999,
            "Stylish high waist jeans for a modern look",
            "https://images.unsplash.com/photo-1541099649105-f69ad21f3246?w=600&h=800&fit=crop",
            "pants",
            "women",
            &["XS", "S", "M", "L"],
        ),
        (
            "Wool Winter Coat",
            11999,
            "Warm wool coat perfect for winter season",
            "https://images.unsplash.com/photo-1539533018447-63fcce2678e3?w=600&h=800&fit=crop",
            "coats",
            "women",
            &["S", "M", "L", "XL"],
        ),
        (
            "Chino Pants",
            3499,
            "Classic chino pants for casual and formal occasions",
            "https://images.unsplash.com/photo-1473966968600-fa801b869a1a?w=600&h=800&fit=crop",
            "pants",
            "men",
            &["30", "32", "34", "36", "38"],
        ),
    ];

    entries
        .iter()
        .map(
            |&(name, price, description, image_url, category, gender, sizes)| {
                Ok(NewProduct {
                    name: name.to_owned(),
                    price: Price::from_cents(price)?,
                    description: description.to_owned(),
                    image_url: image_url.to_owned(),
                    category: category.to_owned(),
                    gender: gender.to_owned(),
                    available_sizes: sizes.iter().map(|&s| s.to_owned()).collect(),
                })
            },
        )
        .collect()
}
