//! Text output formatting with colors.

use chrono::NaiveDateTime;
use fieldguide_core::dates::{self, NOT_AVAILABLE};
use fieldguide_core::format::{
    format_cedula, format_mac, format_phone, format_quantity, format_serial_number, initials,
    mask_sensitive, truncate,
};
use fieldguide_core::{ApiConfig, GuideState, OrderState, WorkGuide, WorkOrderDetail};

use super::json::{GuidesOutput, OrdersOutput, SessionOutput, UpdateOutput, WarehouseOutput};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Widest guide or order name shown in a list row.
const NAME_WIDTH: usize = 24;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Formats login / logout / whoami output.
    pub fn format_session(&self, session: &SessionOutput) -> String {
        let Some(user) = &session.user else {
            return if session.logged_in {
                "Logged in".to_string()
            } else {
                self.dim("Not logged in")
            };
        };

        let mut lines = vec![
            format!("[{}] {}", initials(&user.name, 2), self.bold(&user.name)),
            format!("Login:   {}", self.cyan(&user.username)),
            format!("User id: {}", user.uid),
        ];
        match session.session_valid {
            Some(true) => lines.push(format!("Session: {}", self.green("valid"))),
            Some(false) => lines.push(format!("Session: {}", self.red("expired"))),
            None => {}
        }
        lines.join("\n")
    }

    // ========================================================================
    // Guides
    // ========================================================================

    /// Formats a guide list, one row per guide.
    pub fn format_guides(&self, output: &GuidesOutput) -> String {
        let mut lines: Vec<String> = if output.guides.is_empty() {
            vec![self.dim("No guides")]
        } else {
            output
                .guides
                .iter()
                .map(|guide| {
                    format!(
                        "{:>6}  {:<width$}  {:<16}  {:<12}  {}",
                        guide.id,
                        truncate(&guide.name, NAME_WIDTH),
                        dates::format_date_time(&guide.date),
                        self.guide_state(guide.state),
                        guide.team_name().unwrap_or(NOT_AVAILABLE),
                        width = NAME_WIDTH + 3,
                    )
                })
                .collect()
        };

        if let Some(stats) = &output.statistics {
            lines.push(String::new());
            lines.push(format!(
                "Total: {}  Open: {}  Draft: {}  Closed: {}  Done: {}",
                stats.total, stats.open, stats.draft, stats.closed, stats.done
            ));
        }
        lines.join("\n")
    }

    /// Formats a single guide.
    pub fn format_guide(&self, guide: &WorkGuide, now: NaiveDateTime) -> String {
        let when = guide.scheduled_at().map_or_else(
            || NOT_AVAILABLE.to_string(),
            |at| {
                format!(
                    "{} ({})",
                    dates::format_date_time(&guide.date),
                    dates::relative_time(at, now)
                )
            },
        );

        [
            format!("{} {}", self.bold(&guide.name), self.dim(&format!("#{}", guide.id))),
            format!("State: {}", self.guide_state(guide.state)),
            format!("Date:  {when}"),
            format!("Team:  {}", guide.team_name().unwrap_or(NOT_AVAILABLE)),
        ]
        .join("\n")
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Formats the orders of a guide.
    pub fn format_orders(&self, output: &OrdersOutput) -> String {
        let mut lines = vec![self.bold(&format!("Guide #{}", output.guide_id))];

        if output.orders.is_empty() {
            lines.push(self.dim("No orders"));
        }
        for order in &output.orders {
            lines.push(format!(
                "{:>6}  {:<width$}  {:<12}  {:<16}  {}",
                order.id,
                truncate(&order.name, NAME_WIDTH),
                self.order_state(order.state),
                order.type_name().unwrap_or(NOT_AVAILABLE),
                order.subscription_name().unwrap_or(NOT_AVAILABLE),
                width = NAME_WIDTH + 3,
            ));
        }

        if let Some(stats) = &output.statistics {
            lines.push(String::new());
            lines.push(format!(
                "Total: {}  In progress: {}  Done: {}  Cancelled: {}",
                stats.total, stats.progress, stats.done, stats.cancel
            ));
        }
        lines.join("\n")
    }

    /// Formats an order in full. Passwords are masked unless `show_secrets`.
    pub fn format_order_detail(&self, order: &WorkOrderDetail, show_secrets: bool) -> String {
        let secret = |value: &str| {
            if show_secrets || value.is_empty() {
                value.to_string()
            } else {
                mask_sensitive(value, 0, '*')
            }
        };
        let or_na = |value: &str| {
            if value.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                value.to_string()
            }
        };

        let isp = &order.isp;
        let mut lines = vec![
            format!("{} {}", self.bold(&order.name), self.dim(&format!("#{}", order.id))),
            format!("State:      {}", self.order_state(order.state)),
            format!("Date:       {}", dates::format_date_time(&order.date)),
            format!("Code:       {}", or_na(&order.code)),
            format!("Origin:     {}", or_na(&order.origin)),
            format!("Plan:       {}", or_na(&order.plan)),
            format!("Technician: {}", or_na(&order.technical)),
            String::new(),
            self.bold("Customer"),
            format!("  Name:     {}", or_na(&order.partner.name)),
            format!("  Cédula:   {}", or_na(&format_cedula(&order.partner.cedula))),
            format!("  Phone:    {}", or_na(&format_phone(&order.partner.telefono))),
            format!("  Mobile:   {}", or_na(&format_phone(&order.partner.celular))),
        ];

        if !order.ubicacion.is_unset() {
            lines.push(format!(
                "  Location: {:.6}, {:.6}",
                order.ubicacion.latitude, order.ubicacion.longitude
            ));
        }

        lines.extend([
            String::new(),
            self.bold("Network"),
            format!("  Core:     {}", or_na(&isp.core.name)),
            format!(
                "  OLT:      {} / card {} / port {}",
                or_na(&isp.olt.name),
                or_na(&isp.tarjeta.name),
                or_na(&isp.puerto.name)
            ),
            format!("  NAP:      {} / port {}", or_na(&isp.nap.name), or_na(&isp.nap_port.name)),
            format!("  IP:       {}{}", or_na(&isp.ip.name), if order.is_ipv6 { " (IPv6)" } else { "" }),
            format!("  ONU:      {}", or_na(&isp.onu_type_id.name)),
            format!("  ONT S/N:  {}", or_na(&format_serial_number(&order.serie_ont))),
            format!("  MAC:      {}", or_na(&format_mac(&order.contract_mac))),
            format!("  Status:   {}", or_na(&isp.current_status.status)),
            format!("  Hours:    {}", or_na(&isp.total_hours_spent.time)),
            format!(
                "  Finished: {}",
                isp.technical_end_date
                    .date
                    .as_deref()
                    .map_or_else(|| NOT_AVAILABLE.to_string(), dates::format_date_time)
            ),
            String::new(),
            self.bold("Credentials"),
            format!(
                "  Contract: {} / {}",
                or_na(&order.contract_user),
                or_na(&secret(&order.contract_passwd))
            ),
            format!(
                "  Wi-Fi:    {} / {}",
                or_na(&order.wifi_user),
                or_na(&secret(&order.wifi_passwd))
            ),
        ]);

        if !order.note.trim().is_empty() {
            lines.push(String::new());
            lines.push(self.bold("Note"));
            lines.push(format!("  {}", order.note.trim()));
        }
        lines.join("\n")
    }

    /// Formats the update-order confirmation.
    pub fn format_update(&self, output: &UpdateOutput) -> String {
        format!(
            "{} Order #{} updated ({})",
            self.green("✓"),
            output.order_id,
            output.updated.join(", ")
        )
    }

    // ========================================================================
    // Warehouse
    // ========================================================================

    /// Formats stock rows, with serial numbers when `show_serials`.
    pub fn format_warehouse(&self, output: &WarehouseOutput, show_serials: bool) -> String {
        let mut lines = vec![format!(
            "{} {}",
            self.bold(&output.location_name),
            self.dim(&format!("#{}", output.location_id))
        )];

        if output.stocks.is_empty() {
            lines.push(self.dim("No stock"));
        }
        for item in &output.stocks {
            let serials = if item.has_serials() {
                self.dim(&format!(" [{} S/N]", item.serials.len()))
            } else {
                String::new()
            };
            lines.push(format!(
                "{:>10}  {}{}",
                format_quantity(item.total_quantity),
                item.product_name,
                serials
            ));
            if show_serials {
                for serial in &item.serials {
                    lines.push(format!(
                        "{:>10}    {}",
                        format_quantity(serial.quantity),
                        format_serial_number(&serial.serial_number)
                    ));
                }
            }
        }

        if let Some(stats) = &output.statistics {
            lines.push(String::new());
            lines.push(format!(
                "Products: {}  Quantity: {}  Serial-tracked: {}",
                stats.total_products,
                format_quantity(stats.total_quantity),
                stats.with_serials
            ));
        }
        lines.join("\n")
    }

    // ========================================================================
    // Config
    // ========================================================================

    /// Formats the effective configuration.
    pub fn format_config(&self, config: &ApiConfig) -> String {
        let mut lines = vec![
            self.bold("FieldGuide Configuration"),
            "─".repeat(40),
            format!("Server:      {}", config.base_url),
            format!("Database:    {}", config.db_name),
            format!("Timeout:     {} ms", config.timeout_ms),
            format!("Retries:     {}", config.max_retries),
            format!("Retry delay: {} ms", config.retry_delay_ms),
            "Headers:".to_string(),
        ];
        for (name, value) in &config.default_headers {
            lines.push(format!("  {name}: {value}"));
        }
        lines.join("\n")
    }

    // ========================================================================
    // States
    // ========================================================================

    /// Colored guide state label.
    pub fn guide_state(&self, state: GuideState) -> String {
        let label = state.label();
        match state {
            GuideState::Open => self.green(label),
            GuideState::Draft => self.yellow(label),
            GuideState::Closed | GuideState::Done | GuideState::Unknown => self.dim(label),
        }
    }

    /// Colored order state label.
    pub fn order_state(&self, state: OrderState) -> String {
        let label = state.label();
        match state {
            OrderState::Progress => self.yellow(label),
            OrderState::Done => self.green(label),
            OrderState::Cancel => self.red(label),
            OrderState::Unknown => self.dim(label),
        }
    }

    // ========================================================================
    // Color Helpers
    // ========================================================================

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}
