use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use gcloud_gax::grpc::Code;
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::client::{Client, ClientConfig};
use gcloud_spanner::mutation::insert_or_update;
use gcloud_spanner::statement::Statement;
use gcloud_spanner::value::CommitTimestamp;
use std::sync::Arc;

use super::UrlStore;
use crate::config::SpannerConfig;
use crate::models::MappingRecord;

/// Mapping records stored in a Cloud Spanner table
#[derive(Clone)]
pub struct SpannerStore {
    inner: Arc<Client>,
    table: Arc<str>,
}

impl SpannerStore {
    /// Connect to Spanner and make sure the mapping table exists.
    ///
    /// The gcloud-spanner library picks up SPANNER_EMULATOR_HOST on its own
    /// and talks to the emulator when it is set, production Spanner otherwise.
    /// Instance, database and table are created when missing, so a fresh
    /// emulator needs no manual setup.
    pub async fn connect(config: &SpannerConfig, table: &str) -> Result<Self> {
        Provisioner::new(config).await?.run(table).await?;

        let database_path = config.database_path();

        match &config.emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {} (table: {})",
            database_path,
            table
        );

        Ok(Self {
            inner: Arc::new(client),
            table: Arc::from(table),
        })
    }
}

#[async_trait]
impl UrlStore for SpannerStore {
    /// Insert or overwrite the row for `record.short_code`.
    ///
    /// `created_at` is stamped with the commit timestamp on every write, so it
    /// reflects the most recent create that landed on the code.
    async fn put(&self, record: &MappingRecord) -> Result<()> {
        let mutation = insert_or_update(
            &*self.table,
            &["shortCode", "url", "created_at"],
            &[&record.short_code, &record.url, &CommitTimestamp::new()],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to upsert mapping to Spanner")?;

        tracing::debug!("Upserted mapping with short code: {}", record.short_code);
        Ok(())
    }

    async fn get(&self, short_code: &str) -> Result<Option<String>> {
        let mut statement = Statement::new(format!(
            "SELECT url FROM {} WHERE shortCode = @shortCode",
            self.table
        ));
        statement.add_param("shortCode", &short_code.to_string());

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query mapping from Spanner")?;

        if let Some(row) = result_set.next().await? {
            let url: String = row.column_by_name("url")?;
            tracing::debug!("Read mapping with short code: {}", short_code);
            Ok(Some(url))
        } else {
            tracing::debug!("Mapping not found with short code: {}", short_code);
            Ok(None)
        }
    }

    /// Runs `SELECT 1` in a single-use transaction.
    async fn health_check(&self) -> Result<()> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create health check transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to execute health check query")?;

        if result_set.next().await?.is_some() {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned no results"))
        }
    }

    fn backend(&self) -> &'static str {
        "spanner"
    }
}

/// DDL for the mapping table
fn create_table_ddl(table: &str) -> String {
    format!(
        r#"
CREATE TABLE {} (
    shortCode STRING(64) NOT NULL,
    url STRING(MAX) NOT NULL,
    created_at TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true),
) PRIMARY KEY (shortCode)
"#,
        table
    )
    .trim()
    .to_string()
}

/// Whether a DDL statement creates exactly `table` (plain or backquoted name)
fn ddl_declares_table(statement: &str, table: &str) -> bool {
    let Some(rest) = statement.trim_start().strip_prefix("CREATE TABLE") else {
        return false;
    };
    let name = rest
        .trim_start()
        .split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or_default()
        .trim_matches('`');
    name == table
}

/// Creates whatever part of instance -> database -> table is missing.
///
/// Every step checks before creating, so running it against an already
/// provisioned database only costs three admin reads.
struct Provisioner<'a> {
    admin: AdminClient,
    config: &'a SpannerConfig,
    project_path: String,
    instance_path: String,
    database_path: String,
}

impl<'a> Provisioner<'a> {
    async fn new(config: &'a SpannerConfig) -> Result<Self> {
        let admin = AdminClient::new(AdminClientConfig::default())
            .await
            .context("Failed to create Spanner admin client")?;

        let project_path = format!("projects/{}", config.project);
        let instance_path = format!("{}/instances/{}", project_path, config.instance);

        Ok(Self {
            admin,
            config,
            project_path,
            instance_path,
            database_path: config.database_path(),
        })
    }

    async fn run(&self, table: &str) -> Result<()> {
        tracing::info!("Starting auto-provisioning checks...");
        self.ensure_instance().await?;
        self.ensure_database().await?;
        self.ensure_table(table).await?;
        tracing::info!("Auto-provisioning complete");
        Ok(())
    }

    fn instance_config(&self) -> String {
        let name = if self.config.emulator_host.is_some() {
            "emulator-config"
        } else {
            "regional-us-central1"
        };
        format!("{}/instanceConfigs/{}", self.project_path, name)
    }

    async fn ensure_instance(&self) -> Result<()> {
        let lookup = self
            .admin
            .instance()
            .get_instance(
                GetInstanceRequest {
                    name: self.instance_path.clone(),
                    field_mask: None,
                },
                None,
            )
            .await;

        match lookup {
            Ok(_) => {
                tracing::info!("Instance already exists: {}", self.instance_path);
                return Ok(());
            }
            Err(status) if status.code() == Code::NotFound => {}
            Err(e) => bail!("Failed to check instance existence: {}", e.message()),
        }

        tracing::info!("Instance not found, creating: {}", self.instance_path);
        let request = CreateInstanceRequest {
            parent: self.project_path.clone(),
            instance_id: self.config.instance.clone(),
            instance: Some(Instance {
                name: self.instance_path.clone(),
                config: self.instance_config(),
                display_name: format!("{} instance", self.config.instance),
                node_count: 1,
                ..Default::default()
            }),
        };

        self.admin
            .instance()
            .create_instance(request, None)
            .await
            .context("Failed to start instance creation")?
            .wait(None)
            .await
            .context("Failed to create instance")?;

        tracing::info!("Instance created: {}", self.instance_path);
        Ok(())
    }

    async fn ensure_database(&self) -> Result<()> {
        let lookup = self
            .admin
            .database()
            .get_database(
                GetDatabaseRequest {
                    name: self.database_path.clone(),
                },
                None,
            )
            .await;

        match lookup {
            Ok(_) => {
                tracing::info!("Database already exists: {}", self.database_path);
                return Ok(());
            }
            Err(status) if status.code() == Code::NotFound => {}
            Err(e) => bail!("Failed to check database existence: {}", e.message()),
        }

        tracing::info!("Database not found, creating: {}", self.database_path);
        let request = CreateDatabaseRequest {
            parent: self.instance_path.clone(),
            create_statement: format!("CREATE DATABASE `{}`", self.config.database),
            extra_statements: vec![],
            encryption_config: None,
            database_dialect: 1, // Google Standard SQL
            proto_descriptors: vec![],
        };

        self.admin
            .database()
            .create_database(request, None)
            .await
            .context("Failed to start database creation")?
            .wait(None)
            .await
            .context("Failed to create database")?;

        tracing::info!("Database created: {}", self.database_path);
        Ok(())
    }

    async fn ensure_table(&self, table: &str) -> Result<()> {
        let ddl = self
            .admin
            .database()
            .get_database_ddl(
                GetDatabaseDdlRequest {
                    database: self.database_path.clone(),
                },
                None,
            )
            .await
            .context("Failed to get database DDL")?
            .into_inner();

        if ddl.statements.iter().any(|stmt| ddl_declares_table(stmt, table)) {
            tracing::info!("Table '{}' already exists", table);
            return Ok(());
        }

        tracing::info!("Table '{}' not found, creating...", table);
        let request = UpdateDatabaseDdlRequest {
            database: self.database_path.clone(),
            statements: vec![create_table_ddl(table)],
            operation_id: String::new(),
            proto_descriptors: vec![],
            throughput_mode: false,
        };

        self.admin
            .database()
            .update_database_ddl(request, None)
            .await
            .context("Failed to start table creation")?
            .wait(None)
            .await
            .context("Failed to create table")?;

        tracing::info!("Table '{}' created", table);
        Ok(())
    }
}
