//! App: one invocation's worth of wiring plus the command implementations.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde_json::json;

use ratrack_core::config::RatrackConfig;
use ratrack_core::constants::ADMIN_FLAG_FIELD;
use ratrack_core::errors::{RatrackError, SessionError};
use ratrack_core::models::{LabRecord, LabValues, Role, SessionUser};
use ratrack_core::traits::{DocumentStore, RiskScorer};
use ratrack_labs::{record_lab_entry, LabRecordLocator};
use ratrack_session::{MemoryKeyValueStore, Navigation, Navigator, Router, SessionCache};
use ratrack_storage::StorageEngine;
use ratrack_tracking::{
    change_tone, render_report, trend_tone, FormField, ProgressTracker, TrackerState,
};

use crate::output::CommandOutput;

/// Raw inputs for `ratrack compare`, entered the way the form takes them.
#[derive(Debug, Clone, Default)]
pub struct CompareInput {
    pub months: String,
    pub age: Option<String>,
    pub gender: String,
    pub esr: String,
    pub crp: String,
    pub rf: String,
    pub anti_ccp: String,
}

pub struct App {
    config: RatrackConfig,
    store: Arc<StorageEngine>,
    navigator: Navigator,
    locator: LabRecordLocator,
}

impl App {
    /// Open the database named in `config` and wire every component to it.
    pub fn open(config: RatrackConfig) -> Result<Self> {
        let db_path = Path::new(&config.storage.db_path);
        let store = StorageEngine::open(db_path, &config.storage)
            .with_context(|| format!("Failed to open database {}", db_path.display()))?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    pub fn with_store(config: RatrackConfig, store: Arc<StorageEngine>) -> Self {
        let cache = SessionCache::new(
            Arc::new(MemoryKeyValueStore::new()),
            Arc::new(store.key_value_store()),
            &config.session,
        );
        let navigator = Navigator::new(cache, Router::default(), store.clone(), &config.session);
        let locator = LabRecordLocator::new(store.clone(), config.labs.clone());
        Self {
            config,
            store,
            navigator,
            locator,
        }
    }

    pub fn config(&self) -> &RatrackConfig {
        &self.config
    }

    fn session(&self) -> &SessionCache {
        self.navigator.cache()
    }

    /// The cached user. Errors stay `RatrackError` so `main` can print their code.
    fn signed_in_user(&self) -> Result<SessionUser> {
        let user = self
            .session()
            .current_user()
            .ok_or(RatrackError::from(SessionError::NotSignedIn))?;
        Ok(user)
    }

    /// Explicit uid, else the signed-in user's.
    fn resolve_uid(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(uid) = explicit.filter(|u| !u.is_empty()) {
            return Ok(uid.to_string());
        }
        let user = self.signed_in_user()?;
        let uid = user
            .uid()
            .ok_or(RatrackError::from(SessionError::MissingUid))?;
        Ok(uid.to_string())
    }

    pub fn login(
        &self,
        uid: &str,
        role: Role,
        email: Option<&str>,
        remember: bool,
    ) -> Result<CommandOutput> {
        if uid.trim().is_empty() {
            bail!("uid must not be empty");
        }
        let mut user = SessionUser::new(uid, role);
        if let Some(email) = email {
            user = user.with_email(email);
        }
        self.session()
            .sign_in(&user, remember)
            .context("Failed to cache signed-in user")?;

        let mut text = format!("Signed in as {uid} ({})", user.role.as_ref().map_or("", |r| r.as_str()));
        if !remember {
            text.push_str("\nNot remembered: the session ends with this command. Use --remember to persist it.");
        }
        Ok(CommandOutput::new(
            json!({ "user": user, "remember": remember }),
            text,
        ))
    }

    pub fn logout(&self) -> Result<CommandOutput> {
        self.session().sign_out().context("Failed to clear session")?;
        Ok(CommandOutput::new(json!({ "signedOut": true }), "Signed out"))
    }

    pub fn whoami(&self) -> Result<CommandOutput> {
        match self.session().current_user_with_scope() {
            Some((user, scope)) => {
                let text = format!(
                    "uid:   {}\nrole:  {}\nemail: {}\nscope: {scope}",
                    user.uid().unwrap_or("-"),
                    user.role.as_ref().map_or("-", |r| r.as_str()),
                    user.email.as_deref().unwrap_or("-"),
                );
                Ok(CommandOutput::new(
                    json!({ "user": user, "scope": scope.to_string() }),
                    text,
                ))
            }
            None => Ok(CommandOutput::new(json!({ "user": null }), "Not signed in")),
        }
    }

    pub fn navigate(&self, path: &str) -> Result<CommandOutput> {
        let decision = self.navigator.navigate(path);
        let data = match &decision {
            Navigation::Render(page) => json!({ "path": path, "action": "render", "page": page.to_string() }),
            Navigation::Redirect { to, replace } => {
                json!({ "path": path, "action": "redirect", "to": to, "replace": replace })
            }
            Navigation::Pending => json!({ "path": path, "action": "pending" }),
        };
        Ok(CommandOutput::new(data, format!("{path}: {decision}")))
    }

    pub fn admin_grant(&self, uid: &str) -> Result<CommandOutput> {
        let collection = &self.config.session.admin_collection;
        let mut data = json!({ "grantedAt": chrono::Utc::now().to_rfc3339() });
        data[ADMIN_FLAG_FIELD] = json!(true);
        self.store
            .put(collection, uid, &data)
            .with_context(|| format!("Failed to grant admin to {uid}"))?;
        tracing::info!(uid, "admin: granted");
        Ok(CommandOutput::new(
            json!({ "uid": uid, "isAdmin": true }),
            format!("{uid} is now an admin"),
        ))
    }

    pub fn admin_revoke(&self, uid: &str) -> Result<CommandOutput> {
        let collection = &self.config.session.admin_collection;
        self.store
            .delete(collection, uid)
            .with_context(|| format!("Failed to revoke admin from {uid}"))?;
        tracing::info!(uid, "admin: revoked");
        Ok(CommandOutput::new(
            json!({ "uid": uid, "isAdmin": false }),
            format!("{uid} is no longer an admin"),
        ))
    }

    pub fn labs_add(
        &self,
        user: Option<&str>,
        values: &LabValues,
        collection: Option<&str>,
    ) -> Result<CommandOutput> {
        let uid = self.resolve_uid(user)?;
        let collection = match collection {
            Some(c) => c.to_string(),
            None => self
                .config
                .labs
                .collections
                .first()
                .cloned()
                .context("No lab collections configured")?,
        };
        let doc = record_lab_entry(self.store.as_ref(), &collection, &uid, values)
            .context("Failed to record lab entry")?;
        Ok(CommandOutput::new(
            json!({ "collection": collection, "id": doc.id, "data": doc.data }),
            format!("Recorded lab entry {} in {collection} for {uid}", doc.id),
        ))
    }

    pub fn labs_latest(&self, user: Option<&str>) -> Result<CommandOutput> {
        let uid = self.resolve_uid(user)?;
        let record = self
            .locator
            .latest_for_user(&uid)
            .context("Failed to look up lab entries")?;
        match record {
            Some(record) => {
                let text = describe_record(&record);
                Ok(CommandOutput::new(json!({ "uid": uid, "record": record }), text))
            }
            None => Ok(CommandOutput::new(
                json!({ "uid": uid, "record": null }),
                format!("No lab entries found for {uid}"),
            )),
        }
    }

    /// Run the whole comparison for the signed-in user.
    pub fn compare(&self, scorer: &dyn RiskScorer, input: &CompareInput) -> Result<CommandOutput> {
        let user = self.signed_in_user()?;
        let mut tracker = ProgressTracker::new();
        match tracker.load(Some(&user), &self.locator) {
            TrackerState::Ready => {}
            TrackerState::NoUser => {
                return Err(RatrackError::from(SessionError::MissingUid).into());
            }
            _ => bail!(
                "No previous lab data found. Record an entry first with `ratrack labs add`."
            ),
        }

        tracker.set_field(FormField::MonthsSinceLastTest, input.months.as_str());
        if let Some(age) = &input.age {
            tracker.set_field(FormField::CurrentAge, age.as_str());
        }
        tracker.set_field(FormField::CurrentGender, input.gender.as_str());
        tracker.set_field(FormField::CurrentEsr, input.esr.as_str());
        tracker.set_field(FormField::CurrentCrp, input.crp.as_str());
        tracker.set_field(FormField::CurrentRf, input.rf.as_str());
        tracker.set_field(FormField::CurrentAntiCcp, input.anti_ccp.as_str());

        let last_test = tracker.last_test_date();
        let result = tracker.submit(scorer).context("Analysis Error")?;

        let text = format!("Last test: {last_test}\n\n{}", render_report(result));
        let data = json!({
            "lastTestDate": last_test,
            "result": result,
            "tone": {
                "trend": trend_tone(&result.risk_trend),
                "probabilityChange": change_tone(result.probability_change),
            },
        });
        Ok(CommandOutput::new(data, text))
    }

    pub fn config_show(&self) -> Result<CommandOutput> {
        show_config(&self.config)
    }
}

/// Resolved configuration as TOML text and JSON data.
pub fn show_config(config: &RatrackConfig) -> Result<CommandOutput> {
    let toml = config.to_toml().context("Failed to serialize config")?;
    Ok(CommandOutput::new(serde_json::to_value(config)?, toml))
}

fn describe_record(record: &LabRecord) -> String {
    fn num(v: Option<f64>) -> String {
        v.map_or_else(|| "-".to_string(), |n| n.to_string())
    }
    format!(
        "Latest entry {} ({}), tested {}\n  age:      {}\n  gender:   {}\n  ESR:      {}\n  CRP:      {}\n  RF:       {}\n  anti-CCP: {}",
        record.document_id,
        record.collection,
        record.test_date_label(),
        num(record.age),
        record.gender.as_deref().unwrap_or("-"),
        num(record.esr),
        num(record.crp),
        num(record.rf),
        num(record.anti_ccp),
    )
}
