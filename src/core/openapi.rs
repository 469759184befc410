use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::categories::{
    dtos as categories_dtos,
    handlers::{admin_category_handler, category_handler},
};
use crate::features::items::{
    dtos as items_dtos,
    handlers::{admin_item_handler, item_handler},
};
use crate::features::products::{
    dtos as products_dtos,
    handlers::{admin_product_handler, product_handler},
    models::StockStatus,
};
use crate::features::sample_data::{dtos as sample_data_dtos, handlers as sample_data_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::refresh_token,
        auth::handlers::get_me,
        // Users
        users_handlers::get_profile,
        users_handlers::update_profile,
        // Storefront
        category_handler::list_categories,
        category_handler::get_category,
        item_handler::list_items,
        product_handler::list_products,
        product_handler::get_product,
        // Admin: categories
        admin_category_handler::list_categories,
        admin_category_handler::create_category,
        admin_category_handler::get_category,
        admin_category_handler::update_category,
        admin_category_handler::delete_category,
        // Admin: items
        admin_item_handler::list_items,
        admin_item_handler::create_item,
        admin_item_handler::lookup_items,
        admin_item_handler::get_item,
        admin_item_handler::update_item,
        admin_item_handler::delete_item,
        admin_item_handler::list_category_items,
        // Admin: products
        admin_product_handler::list_products,
        admin_product_handler::create_product,
        admin_product_handler::suggest_sku,
        admin_product_handler::get_product,
        admin_product_handler::update_product,
        admin_product_handler::delete_product,
        admin_product_handler::list_category_products,
        // Admin: sample data
        sample_data_handlers::generate_sample_data,
    ),
    components(
        schemas(
            Meta,
            // Auth
            auth::dtos::RegisterRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::RefreshTokenRequestDto,
            auth::dtos::RefreshTokenResponseDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::AuthUserDto,
            auth::dtos::CurrentUserDto,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::dtos::RefreshTokenResponseDto>,
            ApiResponse<auth::dtos::CurrentUserDto>,
            // Users
            users_dtos::UserProfileDto,
            users_dtos::UpdateProfileDto,
            ApiResponse<users_dtos::UserProfileDto>,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Items
            items_dtos::ItemResponseDto,
            items_dtos::CreateItemDto,
            items_dtos::UpdateItemDto,
            items_dtos::ItemLookupDto,
            ApiResponse<items_dtos::ItemResponseDto>,
            ApiResponse<Vec<items_dtos::ItemResponseDto>>,
            // Products
            StockStatus,
            products_dtos::ProductResponseDto,
            products_dtos::CreateProductDto,
            products_dtos::UpdateProductDto,
            products_dtos::SkuResponseDto,
            ApiResponse<products_dtos::ProductResponseDto>,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            ApiResponse<products_dtos::SkuResponseDto>,
            // Sample data
            sample_data_dtos::SampleDataReportDto,
            ApiResponse<sample_data_dtos::SampleDataReportDto>,
        )
    ),
    tags(
        (name = "auth", description = "Sign-up, login and token refresh"),
        (name = "users", description = "Profile of the signed-in user"),
        (name = "categories", description = "Storefront categories (public)"),
        (name = "items", description = "Storefront items (public)"),
        (name = "products", description = "Storefront products (public)"),
        (name = "admin-categories", description = "Category management (admin only)"),
        (name = "admin-items", description = "Item management (admin only)"),
        (name = "admin-products", description = "Product management (admin only)"),
        (name = "admin-sample-data", description = "Demo catalog generation (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "Catalog and account API for the storefront",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_admin_paths_with_bearer_auth() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/admin/products/{id}"));
        assert!(doc.paths.paths.contains_key("/api/admin/sample-data"));
        assert!(doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer_auth")));
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Shop".to_string(),
            version: "9.9.9".to_string(),
            description: "Docs".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Shop");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
