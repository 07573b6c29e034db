//! The daily low-stock alert cycle orchestrator.
//!
//! Per-merchant-per-day state is derived entirely from the delivery log: no
//! row for today means the cycle has not run, a row means it has, and a new
//! calendar day implicitly resets every merchant. All mutating entry points
//! write the log row last, so a retried cycle re-creates alerts rather than
//! silently losing them. A race window exists between the log check and the
//! log write; the upsert in the log repository folds a duplicate cycle into
//! one row so the one-row-per-day invariant holds regardless.

use std::sync::Arc;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use stockwatch_core::alerting::{
    minutes_of_day, partition_by_urgency, within_daily_window, AlertUrgency, LowStockProduct,
    ALERT_TYPE_LOW_STOCK,
};
use stockwatch_core::types::{DbId, Timestamp};
use stockwatch_db::models::alert::NewAlert;
use stockwatch_db::models::alert_settings::MerchantAlertSettings;
use stockwatch_db::models::delivery_log::AlertDeliveryLog;
use stockwatch_db::repositories::{
    AlertRepo, AlertSettingsRepo, DeliveryLogRepo, InventoryRepo, MerchantRepo,
};
use stockwatch_db::DbPool;

use crate::clock::Clock;
use crate::content::{ContentGenerator, ContentRequest, GeneratedContent};

/// Result of a pure due-check for one merchant.
#[derive(Debug, Clone, Serialize)]
pub struct DueStatus {
    /// True when the merchant is inside the daily window and unprocessed.
    pub due: bool,
    /// Whether alerting is enabled for this merchant.
    pub enabled: bool,
    /// A delivery-log row already exists for today.
    pub already_processed: bool,
    /// Today's delivery-log row when the cycle already ran: how many alerts
    /// went out and for which products. Operator debugging aid.
    pub today_log: Option<AlertDeliveryLog>,
    /// Next wall-clock occurrence of the merchant's preferred time.
    pub next_due_at: Option<Timestamp>,
}

/// Result of a tenant-facing check-due call.
#[derive(Debug, Clone, Serialize)]
pub struct CycleOutcome {
    pub due: bool,
    pub created: usize,
    pub next_due_at: Option<Timestamp>,
}

/// Orchestrates due-checks and alert creation for all merchants.
pub struct AlertEngine {
    pool: DbPool,
    content: ContentGenerator,
    clock: Arc<dyn Clock>,
}

impl AlertEngine {
    /// Create an engine over the given pool, content generator, and clock.
    pub fn new(pool: DbPool, content: ContentGenerator, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            content,
            clock,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }

    /// Pure read: is the merchant inside its daily window with no delivery
    /// log row for today? No side effects beyond lazily creating the
    /// settings row.
    pub async fn is_due(&self, merchant_id: DbId) -> Result<DueStatus, sqlx::Error> {
        let settings = AlertSettingsRepo::get_or_create(&self.pool, merchant_id).await?;
        self.evaluate(&settings).await
    }

    async fn evaluate(&self, settings: &MerchantAlertSettings) -> Result<DueStatus, sqlx::Error> {
        if !settings.enabled {
            return Ok(DueStatus {
                due: false,
                enabled: false,
                already_processed: false,
                today_log: None,
                next_due_at: None,
            });
        }

        let now = self.clock.now();
        let next_due_at = Some(next_occurrence(now, settings.daily_time));

        let today_log =
            DeliveryLogRepo::get_for_day(&self.pool, settings.merchant_id, now.date_naive())
                .await?;
        if let Some(log) = today_log {
            return Ok(DueStatus {
                due: false,
                enabled: true,
                already_processed: true,
                today_log: Some(log),
                next_due_at,
            });
        }

        let due = within_daily_window(
            minutes_of_day(now.time()),
            minutes_of_day(settings.daily_time),
        );
        Ok(DueStatus {
            due,
            enabled: true,
            already_processed: false,
            today_log: None,
            next_due_at,
        })
    }

    /// Tenant-facing poll: run the cycle when the merchant is due,
    /// otherwise report when it next will be.
    pub async fn run_cycle_if_due(&self, merchant_id: DbId) -> Result<CycleOutcome, sqlx::Error> {
        let settings = AlertSettingsRepo::get_or_create(&self.pool, merchant_id).await?;
        let status = self.evaluate(&settings).await?;

        if !status.due {
            return Ok(CycleOutcome {
                due: false,
                created: 0,
                next_due_at: status.next_due_at,
            });
        }

        let created = self.process_for_merchant(&settings).await?;
        Ok(CycleOutcome {
            due: true,
            created,
            next_due_at: status.next_due_at,
        })
    }

    /// Manual trigger: bypasses the time window but still dedups on the
    /// delivery log.
    pub async fn trigger_for_merchant(&self, merchant_id: DbId) -> Result<usize, sqlx::Error> {
        let settings = AlertSettingsRepo::get_or_create(&self.pool, merchant_id).await?;

        if DeliveryLogRepo::exists_for_day(&self.pool, merchant_id, self.today()).await? {
            tracing::debug!(merchant_id, "Alert cycle already ran today, skipping trigger");
            return Ok(0);
        }

        self.process_for_merchant(&settings).await
    }

    /// Batch entry point: process every enabled merchant not yet handled
    /// today. Intended for operator- or cron-triggered runs.
    ///
    /// Per-merchant failures are logged and skipped so one bad tenant cannot
    /// abort the batch. Returns the total number of alerts created.
    pub async fn process_all_enabled(&self) -> Result<usize, sqlx::Error> {
        let all = AlertSettingsRepo::list_enabled(&self.pool).await?;
        let today = self.today();
        let mut total = 0usize;

        for settings in &all {
            let merchant_id = settings.merchant_id;

            match DeliveryLogRepo::exists_for_day(&self.pool, merchant_id, today).await {
                Ok(true) => continue,
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(
                        merchant_id,
                        error = %e,
                        "Failed to read delivery log, skipping merchant"
                    );
                    continue;
                }
            }

            match self.process_for_merchant(settings).await {
                Ok(created) => total += created,
                Err(e) => {
                    tracing::error!(merchant_id, error = %e, "Alert cycle failed for merchant");
                }
            }
        }

        tracing::info!(
            total,
            merchants = all.len(),
            "Batch alert run complete"
        );
        Ok(total)
    }

    /// Run one alert cycle for a merchant: query, classify, generate,
    /// persist, then mark the delivery log.
    ///
    /// Every critical product gets its own alert; the remaining low-stock
    /// products share one grouped alert. A day with no qualifying products
    /// still writes the log row (processed, nothing to report). Returns the
    /// number of alerts created.
    pub async fn process_for_merchant(
        &self,
        settings: &MerchantAlertSettings,
    ) -> Result<usize, sqlx::Error> {
        if !settings.enabled {
            return Ok(0);
        }

        let merchant_id = settings.merchant_id;
        let shop_name = MerchantRepo::shop_name(&self.pool, merchant_id)
            .await?
            .unwrap_or_else(|| format!("Merchant {merchant_id}"));

        let products = InventoryRepo::low_stock_products(
            &self.pool,
            merchant_id,
            settings.low_stock_threshold,
        )
        .await?;
        let today = self.today();

        if products.is_empty() {
            DeliveryLogRepo::record(&self.pool, merchant_id, today, 0, &[]).await?;
            tracing::debug!(merchant_id, "No low-stock products, day marked processed");
            return Ok(0);
        }

        let product_ids: Vec<DbId> = products.iter().map(|p| p.id).collect();
        let (critical, regular) = partition_by_urgency(products, settings.critical_stock_threshold);

        let mut created = 0usize;

        // Critical items warrant individual visibility rather than being
        // buried in a group.
        for product in &critical {
            let request = ContentRequest {
                products: std::slice::from_ref(product),
                shop_name: &shop_name,
                low_stock_threshold: settings.low_stock_threshold,
                critical_stock_threshold: settings.critical_stock_threshold,
                urgency: AlertUrgency::Critical,
                ai_enhanced: settings.ai_enhanced,
            };
            let content = self.content.generate(&request).await;
            let alert = build_alert(
                settings,
                std::slice::from_ref(product),
                AlertUrgency::Critical,
                content,
            );
            AlertRepo::create(&self.pool, &alert).await?;
            created += 1;
        }

        if !regular.is_empty() {
            let request = ContentRequest {
                products: &regular,
                shop_name: &shop_name,
                low_stock_threshold: settings.low_stock_threshold,
                critical_stock_threshold: settings.critical_stock_threshold,
                urgency: AlertUrgency::Low,
                ai_enhanced: settings.ai_enhanced,
            };
            let content = self.content.generate(&request).await;
            let alert = build_alert(settings, &regular, AlertUrgency::Low, content);
            AlertRepo::create(&self.pool, &alert).await?;
            created += 1;
        }

        // The log write commits last: a crash before this point leaves the
        // day unprocessed and the next cycle retries in full.
        DeliveryLogRepo::record(&self.pool, merchant_id, today, created as i32, &product_ids)
            .await?;

        tracing::info!(
            merchant_id,
            created,
            critical = critical.len(),
            "Alert cycle complete"
        );
        Ok(created)
    }
}

/// Assemble the insert DTO for one generated alert.
fn build_alert(
    settings: &MerchantAlertSettings,
    products: &[LowStockProduct],
    urgency: AlertUrgency,
    content: GeneratedContent,
) -> NewAlert {
    let metadata = serde_json::json!({
        "product_count": products.len(),
        "critical": urgency == AlertUrgency::Critical,
        "threshold": settings.low_stock_threshold,
        "critical_threshold": settings.critical_stock_threshold,
        "products": products,
    });

    NewAlert {
        merchant_id: settings.merchant_id,
        alert_type: ALERT_TYPE_LOW_STOCK.to_string(),
        title: content.title,
        body: content.body,
        product_id: if products.len() == 1 {
            Some(products[0].id)
        } else {
            None
        },
        is_ai_enhanced: content.is_ai_enhanced,
        original_body: content.original_body,
        metadata,
    }
}

/// Next wall-clock occurrence of `target` strictly after `now`.
fn next_occurrence(now: DateTime<Utc>, target: NaiveTime) -> Timestamp {
    let candidate = now.date_naive().and_time(target).and_utc();
    if candidate > now {
        candidate
    } else {
        (now.date_naive() + Days::new(1)).and_time(target).and_utc()
    }
}
