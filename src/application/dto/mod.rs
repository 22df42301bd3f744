pub mod compression_form_dto;
