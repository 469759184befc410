/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - can manage categories, items and products
pub const ROLE_ADMIN: &str = "admin";

/// Customer role - can browse the storefront and manage their own profile
pub const ROLE_CUSTOMER: &str = "customer";

// =============================================================================
// CATALOG CONSTANTS
// =============================================================================

/// Display name used when a record points at a category that no longer exists
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Products with fewer units than this are reported as low stock
pub const LOW_STOCK_THRESHOLD: i32 = 10;
