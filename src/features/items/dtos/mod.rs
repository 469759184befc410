pub mod item_dto;

pub use item_dto::{
    CreateItemDto, ItemCategoryQuery, ItemLookupDto, ItemResponseDto, UpdateItemDto,
};
