//! `PostgreSQL` repository implementation for merchant storage.

use super::{
    models::{MerchantChangeset, MerchantRow, NewMerchantRow},
    schema::merchants,
};
use crate::merchant::{
    domain::{
        Merchant, MerchantId, MerchantProfile, PersistedMerchantData, SearchKeyword, SearchMode,
    },
    ports::{MerchantRepository, MerchantRepositoryError, MerchantRepositoryResult},
};
use crate::pagination::{Page, PageRequest};
use crate::persistence::{PersistenceFailure, PgPool, run_blocking, to_total};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed merchant repository.
#[derive(Debug, Clone)]
pub struct PostgresMerchantRepository {
    pool: PgPool,
}

impl PostgresMerchantRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MerchantRepository for PostgresMerchantRepository {
    async fn store(&self, merchant: &Merchant) -> MerchantRepositoryResult<()> {
        let merchant_id = merchant.id();
        let new_row = to_new_row(merchant);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(merchants::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        MerchantRepositoryError::DuplicateMerchant(merchant_id)
                    }
                    _ => MerchantRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, merchant: &Merchant) -> MerchantRepositoryResult<()> {
        let merchant_id = merchant.id();
        let changeset = to_changeset(merchant);
        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(merchants::table.find(merchant_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(MerchantRepositoryError::persistence)?;
            if updated == 0 {
                return Err(MerchantRepositoryError::NotFound(merchant_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: MerchantId) -> MerchantRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(merchants::table.find(id.into_inner()))
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        MerchantRepositoryError::StillReferenced(id)
                    }
                    _ => MerchantRepositoryError::persistence(err),
                })?;
            if deleted == 0 {
                return Err(MerchantRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: MerchantId) -> MerchantRepositoryResult<Option<Merchant>> {
        run_blocking(&self.pool, move |connection| {
            let row = merchants::table
                .find(id.into_inner())
                .select(MerchantRow::as_select())
                .first::<MerchantRow>(connection)
                .optional()
                .map_err(MerchantRepositoryError::persistence)?;
            row.map(row_to_merchant).transpose()
        })
        .await
    }

    async fn list(&self, page: PageRequest) -> MerchantRepositoryResult<Page<Merchant>> {
        run_blocking(&self.pool, move |connection| {
            connection
                .transaction(|conn| {
                    let total = merchants::table.count().get_result::<i64>(conn)?;
                    let rows = merchants::table
                        .order((merchants::created_at.desc(), merchants::id.desc()))
                        .limit(i64::from(page.per_page()))
                        .offset(i64::try_from(page.offset()).unwrap_or(i64::MAX))
                        .select(MerchantRow::as_select())
                        .load::<MerchantRow>(conn)?;
                    Ok::<_, DieselError>((rows, total))
                })
                .map_err(MerchantRepositoryError::persistence)
                .and_then(|(rows, total)| {
                    let items = rows
                        .into_iter()
                        .map(row_to_merchant)
                        .collect::<MerchantRepositoryResult<Vec<_>>>()?;
                    Ok(Page::new(items, to_total::<MerchantRepositoryError>(total)?))
                })
        })
        .await
    }

    async fn search(
        &self,
        keyword: &SearchKeyword,
        mode: SearchMode,
    ) -> MerchantRepositoryResult<Vec<Merchant>> {
        let pattern = format!("%{}%", escape_like(keyword.as_str()));
        run_blocking(&self.pool, move |connection| {
            let ordered = merchants::table
                .order((merchants::created_at.desc(), merchants::id.desc()))
                .select(MerchantRow::as_select());
            let rows = match mode {
                SearchMode::CaseSensitive => ordered
                    .filter(
                        merchants::name
                            .like(pattern.as_str())
                            .or(merchants::contact_person.like(pattern.as_str()))
                            .or(merchants::phone.like(pattern.as_str())),
                    )
                    .load::<MerchantRow>(connection),
                SearchMode::CaseInsensitive => ordered
                    .filter(
                        merchants::name
                            .ilike(pattern.as_str())
                            .or(merchants::contact_person.ilike(pattern.as_str()))
                            .or(merchants::phone.ilike(pattern.as_str())),
                    )
                    .load::<MerchantRow>(connection),
            }
            .map_err(MerchantRepositoryError::persistence)?;
            rows.into_iter().map(row_to_merchant).collect()
        })
        .await
    }
}

/// Escapes `LIKE` metacharacters so the keyword matches literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn to_new_row(merchant: &Merchant) -> NewMerchantRow {
    let profile = merchant.profile();
    NewMerchantRow {
        id: merchant.id().into_inner(),
        name: profile.name().to_owned(),
        contact_person: profile.contact_person().to_owned(),
        phone: profile.phone().to_owned(),
        address: profile.address().to_owned(),
        created_at: merchant.created_at(),
        updated_at: merchant.updated_at(),
    }
}

fn to_changeset(merchant: &Merchant) -> MerchantChangeset {
    let profile = merchant.profile();
    MerchantChangeset {
        name: profile.name().to_owned(),
        contact_person: profile.contact_person().to_owned(),
        phone: profile.phone().to_owned(),
        address: profile.address().to_owned(),
        updated_at: merchant.updated_at(),
    }
}

fn row_to_merchant(row: MerchantRow) -> MerchantRepositoryResult<Merchant> {
    let MerchantRow {
        id,
        name,
        contact_person,
        phone,
        address,
        created_at,
        updated_at,
    } = row;
    let profile = MerchantProfile::new(name, contact_person, phone, address)
        .map_err(MerchantRepositoryError::persistence)?;
    Ok(Merchant::from_persisted(PersistedMerchantData {
        id: MerchantId::from_uuid(id),
        profile,
        created_at,
        updated_at,
    }))
}
