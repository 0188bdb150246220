//! # Shell
//!
//! A line-oriented stand-in for the views: each stdin line is tokenized,
//! parsed by clap into a [`ShellCommand`], run through the same commands a
//! view would call, and rendered as text.
//!
//! ## Grammar
//! ```text
//! products [category] [min] [max] [sort]   grid (category "all", prices like 59.99)
//! search <term>...                         name or category contains term
//! show <id>                                detail page + related products
//! add <id> [size color [qty]]              quick add, or a chosen variant
//! qty <id> <size> <color> <delta>          sidebar +/- buttons
//! set <id> <size> <color> <qty>            overwrite a row's quantity
//! rm <id> <size> <color>                   trash icon
//! cart | clear [cart|wishlist] | panel [cart|wishlist]
//! wish <id> | unwish <id> | wishlist | move <id>
//! checkout key=value ...                   e.g. first_name=Ada "address=1 Main St"
//! json                                     last response as JSON
//! help [command] | quit
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Write as _;
use thiserror::Error;

use storefront_core::{
    CartLineItem, CategoryFilter, CheckoutForm, Money, Order, PriceRange, ProductId, SortBy,
    VariantKey,
};

use crate::commands::{cart, checkout, product, wishlist};
use crate::error::ApiError;
use crate::state::Storefront;

// =============================================================================
// Parsing
// =============================================================================

/// Errors from reading a shell line.
#[derive(Debug, Error)]
pub enum LineError {
    #[error("unterminated quote")]
    UnterminatedQuote,

    /// Unknown command, bad argument, or a `help` request; the message is
    /// clap's rendered output.
    #[error(transparent)]
    Command(#[from] clap::Error),
}

/// Which sidebar a `clear` or `panel` command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Panel {
    Cart,
    Wishlist,
}

/// The `<id> <size> <color>` triple naming one cart row.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct RowArgs {
    /// Product id
    pub id: ProductId,
    pub size: String,
    pub color: String,
}

impl RowArgs {
    pub fn key(&self) -> VariantKey {
        VariantKey::new(self.id, self.size.as_str(), self.color.as_str())
    }
}

/// One line of input; the first token names the command.
#[derive(Debug, Parser)]
#[command(multicall = true, subcommand_required = true, help_template = "commands:\n{subcommands}")]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum ShellCommand {
    /// Product grid, filtered and sorted
    #[command(visible_alias = "ls")]
    Products {
        /// Category name, or "all"
        #[arg(default_value = "all")]
        category: CategoryFilter,
        /// Lowest price, e.g. 20 or 19.99
        #[arg(allow_negative_numbers = true)]
        min: Option<Money>,
        /// Highest price
        #[arg(allow_negative_numbers = true)]
        max: Option<Money>,
        /// price-low, price-high, rating or newest
        #[arg(default_value = "default")]
        sort: SortBy,
    },
    /// Products whose name or category contains the term
    Search {
        #[arg(required = true)]
        term: Vec<String>,
    },
    /// Detail page with related products
    Show { id: ProductId },
    /// Quick add, or add a chosen size and color
    Add {
        id: ProductId,
        size: Option<String>,
        color: Option<String>,
        quantity: Option<i64>,
    },
    /// Move a cart row's quantity up or down
    #[command(name = "qty")]
    ChangeQuantity {
        #[command(flatten)]
        row: RowArgs,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Overwrite a cart row's quantity
    #[command(name = "set")]
    SetQuantity {
        #[command(flatten)]
        row: RowArgs,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a cart row
    #[command(name = "rm")]
    Remove {
        #[command(flatten)]
        row: RowArgs,
    },
    /// Show the cart
    Cart,
    /// Empty the cart or the wishlist
    Clear {
        #[arg(value_enum, default_value_t = Panel::Cart)]
        target: Panel,
    },
    /// Open or close a sidebar
    #[command(name = "panel")]
    TogglePanel {
        #[arg(value_enum, default_value_t = Panel::Cart)]
        target: Panel,
    },
    /// Save or unsave a product
    Wish { id: ProductId },
    /// Remove a saved product
    Unwish { id: ProductId },
    /// Show the wishlist
    Wishlist,
    /// Move a saved product into the cart
    Move { id: ProductId },
    /// Place an order; snake_case or camelCase form fields
    Checkout {
        #[arg(value_name = "KEY=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Last response as JSON
    Json,
    /// Leave the shell
    #[command(visible_alias = "exit")]
    Quit,
}

/// Splits a line on whitespace, keeping quoted runs together.
///
/// Single and double quotes both group; quotes may start mid-token, so
/// `"address=1 Main St"` and `address="1 Main St"` are the same token.
pub fn tokenize(line: &str) -> Result<Vec<String>, LineError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(LineError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, LineError> {
    let tokens = tokenize(line)?;
    if tokens.is_empty() {
        return Ok(None);
    }
    let parsed = ShellLine::try_parse_from(tokens)?;
    Ok(Some(parsed.command))
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

/// `first_name` and `firstName` both name the `firstName` field.
fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for ch in key.chars() {
        if ch == '_' || ch == '-' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Builds a checkout form from `key=value` pairs.
///
/// Unset fields keep their form defaults; unknown keys are a bad request.
fn checkout_form(fields: Vec<(String, String)>) -> Result<CheckoutForm, ApiError> {
    let mut form = match serde_json::to_value(CheckoutForm::default()) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };

    for (key, value) in fields {
        let key = camel_case(&key);
        if !form.contains_key(&key) {
            return Err(ApiError::bad_request(format!("unknown checkout field '{}'", key)));
        }
        form.insert(key, Value::String(value));
    }

    serde_json::from_value(Value::Object(form)).map_err(|e| ApiError::bad_request(e.to_string()))
}

// =============================================================================
// Execution
// =============================================================================

/// The `show` response: the product plus its related products.
#[derive(Debug, Serialize)]
struct ProductDetail {
    product: product::ProductDto,
    related: Vec<product::ProductDto>,
}

/// What the driver loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Print(String),
    Quit,
}

/// Runs parsed commands against a [`Storefront`] and renders the results.
#[derive(Debug)]
pub struct Shell {
    store: Storefront,
    last_response: Option<Value>,
}

impl Shell {
    pub fn new(store: Storefront) -> Self {
        Shell {
            store,
            last_response: None,
        }
    }

    pub fn store(&self) -> &Storefront {
        &self.store
    }

    /// Parses and runs one input line.
    pub async fn handle_line(&mut self, line: &str) -> Reply {
        match parse_line(line) {
            Ok(Some(command)) => self.execute(command).await,
            Ok(None) => Reply::Print(String::new()),
            Err(LineError::Command(e)) => Reply::Print(e.to_string().trim_end().to_string()),
            Err(e) => Reply::Print(format!("error: {}", e)),
        }
    }

    pub async fn execute(&mut self, command: ShellCommand) -> Reply {
        match command {
            ShellCommand::Quit => Reply::Quit,
            ShellCommand::Json => Reply::Print(match &self.last_response {
                Some(value) => serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("error: {}", e)),
                None => "no response yet".to_string(),
            }),
            other => match self.run(other).await {
                Ok(text) => Reply::Print(text),
                Err(e) => Reply::Print(format!("error: {}", e)),
            },
        }
    }

    fn remember<T: Serialize>(&mut self, response: &T) {
        self.last_response = serde_json::to_value(response).ok();
    }

    async fn run(&mut self, command: ShellCommand) -> Result<String, ApiError> {
        let store = self.store.clone();
        let notifier = &*store.notifier;

        let text = match command {
            ShellCommand::Products {
                category,
                min,
                max,
                sort,
            } => {
                let defaults = store.config.default_filter();
                let range = PriceRange::new(
                    min.unwrap_or(defaults.price_range.min()),
                    max.unwrap_or(defaults.price_range.max()),
                )?;
                let filter = defaults
                    .with_category(category)
                    .with_price_range(range)
                    .with_sort(sort);
                let response = product::list_products(&store.catalog, &store.wishlist, filter);
                self.remember(&response);
                self.render_products(&response.products)
            }
            ShellCommand::Search { term } => {
                let response = product::search_products(&store.catalog, &store.wishlist, &term.join(" "));
                self.remember(&response);
                self.render_products(&response.products)
            }
            ShellCommand::Show { id } => {
                let detail = product::get_product(&store.catalog, &store.wishlist, id)?;
                let related =
                    product::related_products(&store.catalog, &store.wishlist, id, store.config.related_limit)?;
                let text = self.render_detail(&detail, &related);
                self.remember(&ProductDetail { product: detail, related });
                text
            }
            ShellCommand::Add {
                id,
                size: None,
                ..
            } => {
                let response = cart::quick_add_to_cart(&store.catalog, &store.cart, notifier, id)?;
                self.remember(&response);
                self.render_cart(&response)
            }
            ShellCommand::Add {
                id,
                size: Some(size),
                color,
                quantity,
            } => {
                let color = color.unwrap_or_default();
                let response =
                    cart::add_to_cart(&store.catalog, &store.cart, notifier, id, &size, &color, quantity)?;
                self.remember(&response);
                self.render_cart(&response)
            }
            ShellCommand::ChangeQuantity { row, delta } => {
                let response = cart::change_cart_quantity(&store.cart, notifier, &row.key(), delta)?;
                self.remember(&response);
                self.render_cart(&response)
            }
            ShellCommand::SetQuantity { row, quantity } => {
                let response = cart::set_cart_quantity(&store.cart, notifier, &row.key(), quantity)?;
                self.remember(&response);
                self.render_cart(&response)
            }
            ShellCommand::Remove { row } => {
                let response = cart::remove_from_cart(&store.cart, notifier, &row.key());
                self.remember(&response);
                self.render_cart(&response)
            }
            ShellCommand::Cart => {
                let response = cart::get_cart(&store.cart);
                self.remember(&response);
                self.render_cart(&response)
            }
            ShellCommand::Clear { target: Panel::Cart } => {
                let response = cart::clear_cart(&store.cart);
                self.remember(&response);
                self.render_cart(&response)
            }
            ShellCommand::Clear { target: Panel::Wishlist } => {
                let response = wishlist::clear_wishlist(&store.wishlist);
                self.remember(&response);
                self.render_wishlist(&response)
            }
            ShellCommand::TogglePanel { target: Panel::Cart } => {
                let response = cart::toggle_cart_panel(&store.cart);
                self.remember(&response);
                format!("cart panel {}", open_or_closed(response.is_panel_open))
            }
            ShellCommand::TogglePanel { target: Panel::Wishlist } => {
                let response = wishlist::toggle_wishlist_panel(&store.wishlist);
                self.remember(&response);
                format!("wishlist panel {}", open_or_closed(response.is_panel_open))
            }
            ShellCommand::Wish { id } => {
                let response = wishlist::toggle_wishlist(&store.catalog, &store.wishlist, notifier, id)?;
                self.remember(&response);
                self.render_wishlist(&response)
            }
            ShellCommand::Unwish { id } => {
                let response = wishlist::remove_from_wishlist(&store.wishlist, notifier, id);
                self.remember(&response);
                self.render_wishlist(&response)
            }
            ShellCommand::Wishlist => {
                let response = wishlist::get_wishlist(&store.wishlist);
                self.remember(&response);
                self.render_wishlist(&response)
            }
            ShellCommand::Move { id } => {
                let response = wishlist::move_wishlist_item_to_cart(&store.wishlist, &store.cart, notifier, id)?;
                self.remember(&response);
                self.render_wishlist(&response)
            }
            ShellCommand::Checkout { fields } => {
                let form = checkout_form(fields)?;
                let order = checkout::place_order(&store.cart, &store.config, notifier, form).await?;
                self.remember(&order);
                self.render_order(&order)
            }
            ShellCommand::Json | ShellCommand::Quit => String::new(),
        };

        Ok(text)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn money(&self, amount: Money) -> String {
        self.store.config.format_currency(amount)
    }

    fn render_products(&self, products: &[product::ProductDto]) -> String {
        if products.is_empty() {
            return "No products found".to_string();
        }
        let mut out = String::new();
        for dto in products {
            let p = &dto.product;
            let _ = write!(out, "#{:<3} {:<26} {:>9}", p.id.get(), p.name, self.money(p.price));
            if let Some(original) = p.original_price.filter(|_| dto.is_on_sale) {
                let _ = write!(out, " (was {})", self.money(original));
            }
            let _ = write!(out, "  {:.1}*  {}", p.rating, p.category);
            if p.is_new {
                out.push_str("  NEW");
            }
            if dto.is_wishlisted {
                out.push_str("  <3");
            }
            out.push('\n');
        }
        let _ = write!(out, "{} products", products.len());
        out
    }

    fn render_detail(&self, dto: &product::ProductDto, related: &[product::ProductDto]) -> String {
        let p = &dto.product;
        let mut out = format!(
            "{} ({})\n  price:  {}\n  sizes:  {}\n  colors: {}\n  rating: {:.1}",
            p.name,
            p.category.display_name(),
            self.money(p.price),
            p.sizes.join(", "),
            p.colors.join(", "),
            p.rating,
        );
        if !related.is_empty() {
            let names: Vec<&str> = related.iter().map(|r| r.product.name.as_str()).collect();
            let _ = write!(out, "\n  you may also like: {}", names.join(", "));
        }
        out
    }

    fn render_line(&self, line: &CartLineItem) -> String {
        format!(
            "  #{:<3} {:<26} {}/{}  x{}  {}",
            line.product_id.get(),
            line.name,
            line.size,
            line.color,
            line.quantity,
            self.money(line.line_total())
        )
    }

    fn render_cart(&self, response: &cart::CartResponse) -> String {
        if response.items.is_empty() {
            return format!("Your cart is empty (panel {})", open_or_closed(response.is_panel_open));
        }
        let mut out = format!(
            "Cart: {} items in {} lines (panel {})\n",
            response.totals.total_item_count,
            response.totals.line_count,
            open_or_closed(response.is_panel_open)
        );
        for line in &response.items {
            out.push_str(&self.render_line(line));
            out.push('\n');
        }
        let _ = write!(out, "  Total: {}", self.money(response.totals.total_price));
        out
    }

    fn render_wishlist(&self, response: &wishlist::WishlistResponse) -> String {
        if response.items.is_empty() {
            return "Your wishlist is empty".to_string();
        }
        let mut out = format!("Wishlist: {} items\n", response.total_item_count);
        for entry in &response.items {
            let _ = writeln!(
                out,
                "  #{:<3} {:<26} {}",
                entry.product_id().get(),
                entry.name(),
                self.money(entry.unit_price())
            );
        }
        out.pop();
        out
    }

    fn render_order(&self, order: &Order) -> String {
        let mut out = format!(
            "Order {} placed for {} <{}>\n",
            order.id, order.ship_to, order.email
        );
        for line in &order.lines {
            out.push_str(&self.render_line(line));
            out.push('\n');
        }
        let _ = write!(
            out,
            "  Total: {} ({} items, card ending {})",
            self.money(order.total),
            order.item_count,
            order.card_last_four
        );
        out
    }
}

fn open_or_closed(open: bool) -> &'static str {
    if open {
        "open"
    } else {
        "closed"
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
