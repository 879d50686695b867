use chrono::Utc;
use sea_orm::{
    ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
    sea_query::Expr,
};

use crate::{
    Account, EngineError, NewAccount, ResultEngine, accounts,
    util::{account_write_error, normalize_required, optional_text},
};

use super::{Engine, with_tx};

const LOWER_NAME: &str = "LOWER(name)";

impl Engine {
    /// Every account, ordered by case-insensitive name.
    pub async fn list_accounts(&self) -> ResultEngine<Vec<Account>> {
        let models = accounts::Entity::find()
            .order_by_asc(Expr::cust(LOWER_NAME))
            .order_by_asc(accounts::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Account::from).collect())
    }

    /// Accounts whose name contains `term`, ignoring case.
    ///
    /// A blank term lists every account.
    pub async fn search_accounts(&self, term: &str) -> ResultEngine<Vec<Account>> {
        let term = term.trim();
        if term.is_empty() {
            return self.list_accounts().await;
        }
        let pattern = format!("%{}%", term.to_lowercase());
        let models = accounts::Entity::find()
            .filter(Expr::expr(Expr::cust(LOWER_NAME)).like(pattern))
            .order_by_asc(Expr::cust(LOWER_NAME))
            .order_by_asc(accounts::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Account::from).collect())
    }

    /// Look an account up by exact, case-insensitive name.
    ///
    /// Returns [`EngineError::KeyNotFound`] when no account matches.
    pub async fn account_by_name(&self, name: &str) -> ResultEngine<Account> {
        let name = name.trim();
        accounts::Entity::find()
            .filter(Expr::cust(LOWER_NAME).eq(name.to_lowercase()))
            .one(&self.database)
            .await?
            .map(Account::from)
            .ok_or_else(|| EngineError::KeyNotFound(name.to_string()))
    }

    pub async fn account_by_id(&self, id: i64) -> ResultEngine<Account> {
        accounts::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(Account::from)
            .ok_or_else(|| EngineError::KeyNotFound(format!("account #{id}")))
    }

    /// Insert a new account.
    ///
    /// Names are unique ignoring case: a clash is reported as
    /// [`EngineError::AccountExists`] rather than a database error.
    pub async fn create_account(&self, input: NewAccount) -> ResultEngine<Account> {
        let name = normalize_required(&input.name, "account name")?;
        let created_at = input.created_at.unwrap_or_else(Utc::now);
        with_tx!(self, |db_tx| {
            if name_taken(&db_tx, &name, None).await? {
                return Err(EngineError::AccountExists(name));
            }

            let model = accounts::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name.clone()),
                phone: ActiveValue::Set(optional_text(&input.phone)),
                address: ActiveValue::Set(optional_text(&input.address)),
                email: ActiveValue::Set(optional_text(&input.email)),
                decision_maker: ActiveValue::Set(optional_text(&input.decision_maker)),
                creator: ActiveValue::Set(input.creator.trim().to_string()),
                created_at: ActiveValue::Set(created_at),
            }
            .insert(&db_tx)
            .await
            .map_err(|err| account_write_error(err, &name))?;

            tracing::info!(account_id = model.id, name = %model.name, "account created");
            Ok(Account::from(model))
        })
    }

    /// Persist edits to an existing account's name and contact fields.
    ///
    /// `creator` and `created_at` are never rewritten.
    pub async fn update_account(&self, account: &Account) -> ResultEngine<Account> {
        let name = normalize_required(&account.name, "account name")?;
        with_tx!(self, |db_tx| {
            let existing = accounts::Entity::find_by_id(account.id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(format!("account #{}", account.id)))?;

            if name_taken(&db_tx, &name, Some(account.id)).await? {
                return Err(EngineError::AccountExists(name));
            }

            let mut model: accounts::ActiveModel = existing.into();
            model.name = ActiveValue::Set(name.clone());
            model.phone = ActiveValue::Set(optional_text(&account.phone));
            model.address = ActiveValue::Set(optional_text(&account.address));
            model.email = ActiveValue::Set(optional_text(&account.email));
            model.decision_maker = ActiveValue::Set(optional_text(&account.decision_maker));
            let model = model
                .update(&db_tx)
                .await
                .map_err(|err| account_write_error(err, &name))?;

            tracing::info!(account_id = model.id, name = %model.name, "account updated");
            Ok(Account::from(model))
        })
    }
}

async fn name_taken<C: ConnectionTrait>(
    db: &C,
    name: &str,
    exclude: Option<i64>,
) -> ResultEngine<bool> {
    let mut query = accounts::Entity::find().filter(Expr::cust(LOWER_NAME).eq(name.to_lowercase()));
    if let Some(id) = exclude {
        query = query.filter(accounts::Column::Id.ne(id));
    }
    Ok(query.one(db).await?.is_some())
}
