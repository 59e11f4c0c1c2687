pub mod put_media_item;
