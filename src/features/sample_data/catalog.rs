//! The demo catalog inserted by the sample data generator.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::features::categories::dtos::CreateCategoryDto;
use crate::features::products::dtos::CreateProductDto;

pub struct SampleCategory {
    pub name: &'static str,
    pub description: &'static str,
}

pub struct SampleProduct {
    pub name: &'static str,
    pub description: &'static str,
    pub price_cents: i64,
    /// Index into `CATEGORIES`
    pub category: usize,
    pub image_url: &'static str,
    pub stock: i32,
    pub sku: &'static str,
}

pub const CATEGORIES: [SampleCategory; 5] = [
    SampleCategory {
        name: "Electronics",
        description: "Electronic devices and gadgets",
    },
    SampleCategory {
        name: "Clothing",
        description: "Fashion and apparel",
    },
    SampleCategory {
        name: "Books",
        description: "Books and educational materials",
    },
    SampleCategory {
        name: "Home & Garden",
        description: "Home improvement and garden supplies",
    },
    SampleCategory {
        name: "Sports",
        description: "Sports equipment and accessories",
    },
];

pub const PRODUCTS: [SampleProduct; 8] = [
    SampleProduct {
        name: "iPhone 15 Pro",
        description: "Latest iPhone with advanced camera system and A17 Pro chip",
        price_cents: 99_999,
        category: 0,
        image_url: "https://images.unsplash.com/photo-1592750475338-74b7b21085ab?w=400",
        stock: 25,
        sku: "IPH15PRO001",
    },
    SampleProduct {
        name: "MacBook Air M2",
        description: "Powerful laptop with M2 chip and all-day battery life",
        price_cents: 119_999,
        category: 0,
        image_url: "https://images.unsplash.com/photo-1517336714731-489689fd1ca8?w=400",
        stock: 15,
        sku: "MBA13M2001",
    },
    SampleProduct {
        name: "Nike Air Max 270",
        description: "Comfortable running shoes with Max Air cushioning",
        price_cents: 14_999,
        category: 1,
        image_url: "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=400",
        stock: 50,
        sku: "NAM270001",
    },
    SampleProduct {
        name: "Levi's 501 Jeans",
        description: "Classic straight-fit jeans made from premium denim",
        price_cents: 8_999,
        category: 1,
        image_url: "https://images.unsplash.com/photo-1542272604-787c3835535d?w=400",
        stock: 75,
        sku: "LEV501001",
    },
    SampleProduct {
        name: "The Psychology of Programming",
        description: "Essential book for understanding software development mindset",
        price_cents: 2_999,
        category: 2,
        image_url: "https://images.unsplash.com/photo-1481627834876-b7833e8f5570?w=400",
        stock: 100,
        sku: "PSY001",
    },
    SampleProduct {
        name: "Smart Garden Kit",
        description: "Automated indoor garden system with LED grow lights",
        price_cents: 19_999,
        category: 3,
        image_url: "https://images.unsplash.com/photo-1416879595882-3373a0480b5b?w=400",
        stock: 20,
        sku: "SGK001",
    },
    SampleProduct {
        name: "Yoga Mat Premium",
        description: "Non-slip yoga mat with alignment lines and carrying strap",
        price_cents: 4_999,
        category: 4,
        image_url: "https://images.unsplash.com/photo-1544367567-0f2fcb009e0b?w=400",
        stock: 40,
        sku: "YMP001",
    },
    SampleProduct {
        name: "Wireless Headphones",
        description: "Premium noise-cancelling wireless headphones",
        price_cents: 29_999,
        category: 0,
        image_url: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=400",
        stock: 30,
        sku: "WH001",
    },
];

impl SampleCategory {
    pub fn to_dto(&self) -> CreateCategoryDto {
        CreateCategoryDto {
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            is_active: Some(true),
        }
    }
}

impl SampleProduct {
    pub fn to_dto(&self, category_id: Uuid) -> CreateProductDto {
        CreateProductDto {
            name: self.name.to_string(),
            description: self.description.to_string(),
            price: Decimal::new(self.price_cents, 2),
            stock: self.stock,
            sku: Some(self.sku.to_string()),
            category_id,
            image_url: Some(self.image_url.to_string()),
            item_ids: Vec::new(),
            is_active: Some(true),
        }
    }
}
