use axum_booking_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let user_id = ensure_user(&pool, "Dewi Santoso", "dewi@example.com").await?;
    ensure_user(&pool, "Admin", "admin@example.com").await?;
    seed_catalog(&pool).await?;

    println!("Seed completed. Demo user ID: {user_id}");
    Ok(())
}

async fn ensure_user(pool: &sqlx::PgPool, full_name: &str, email: &str) -> anyhow::Result<Uuid> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, full_name, email)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(full_name)
    .bind(email)
    .fetch_optional(pool)
    .await?;

    // If the user already exists, fetch the id.
    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {email}");
    Ok(user_id)
}

async fn seed_catalog(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let categories = [
        ("Cleaning", vec![
            ("Deep Cleaning", "80.00", Some("55.00"), "sparkles"),
            ("Window Washing", "45.00", None, "droplet"),
        ]),
        ("Repairs", vec![
            ("Plumbing Fix", "120.00", Some("95.00"), "wrench"),
            ("Electrical Check", "150.00", None, "zap"),
        ]),
        ("Outdoors", vec![
            ("Lawn Mowing", "60.00", Some("40.00"), "leaf"),
        ]),
    ];

    for (category_name, services) in categories {
        let (category_id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO categories (id, name)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(category_name)
        .fetch_one(pool)
        .await?;

        for (name, normal_price, member_price, icon) in services {
            sqlx::query(
                r#"
                INSERT INTO services (id, name, normal_price, member_price, icon, category_id)
                SELECT $1, $2, $3, $4, $5, $6
                WHERE NOT EXISTS (SELECT 1 FROM services WHERE name = $2)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(name)
            .bind(normal_price)
            .bind(member_price)
            .bind(icon)
            .bind(category_id)
            .execute(pool)
            .await?;
        }
    }

    println!("Seeded catalog");
    Ok(())
}
