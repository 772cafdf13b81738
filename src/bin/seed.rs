use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use true_origin_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        enums::{AccountStatus, Role},
        products::{ActiveModel as ProductActive, Column as ProdCol, Entity as Products},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
    services::auth_service::hash_password,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let admin_id = ensure_user(&orm, "Admin", "admin@example.com", "admin123", Role::Admin).await?;
    let company_id =
        ensure_user(&orm, "Acme Foods", "company@example.com", "company123", Role::Company).await?;
    seed_products(&orm, company_id).await?;

    println!("Seed completed. Admin ID: {admin_id}, Company ID: {company_id}");
    Ok(())
}

async fn ensure_user(
    orm: &DatabaseConnection,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<Uuid> {
    // If user already exists, reuse its id
    if let Some(existing) = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(orm)
        .await?
    {
        println!("User {email} already present");
        return Ok(existing.id);
    }

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(hash_password(password)?),
        role: Set(role),
        // The seeded company is approved so it can register products right away.
        account_status: Set((role == Role::Company).then_some(AccountStatus::Approved)),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;

    println!("Ensured user {email} (role={})", role.as_str());
    Ok(user.id)
}

async fn seed_products(orm: &DatabaseConnection, company_id: Uuid) -> anyhow::Result<()> {
    let products = [
        ("Kashmiri Saffron 2g", "Valley Traders", 65_000, "Grade A1 mongra saffron"),
        ("Darjeeling First Flush 100g", "Hill Estates", 42_000, "Single-estate spring tea"),
        ("Alphonso Mango Pulp 850g", "Konkan Co-op", 28_000, "Ratnagiri Alphonso, no added sugar"),
        ("Wild Forest Honey 500g", "Nilgiri Collective", 39_000, "Raw, unfiltered honey"),
    ];
    let manufactured = NaiveDate::from_ymd_opt(2024, 6, 1)
        .ok_or_else(|| anyhow::anyhow!("invalid seed date"))?;

    for (name, distributor, price, description) in products {
        let exists = Products::find()
            .filter(ProdCol::Name.eq(name))
            .filter(ProdCol::Manufacturer.eq(company_id))
            .one(orm)
            .await?
            .is_some();
        if exists {
            continue;
        }
        ProductActive {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            manufacturer: Set(company_id),
            distributor: Set(distributor.to_string()),
            price: Set(price),
            manufacturing_date: Set(manufactured),
            expiry_date: Set(manufactured.checked_add_months(chrono::Months::new(24))),
            description: Set(description.to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(orm)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
