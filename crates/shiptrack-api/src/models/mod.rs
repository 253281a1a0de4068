//! Request and response models for the REST API.

mod shipment_request;
mod shipment_response;

pub use shipment_request::{CreateShipmentRequest, ListShipmentsQuery, UpdateStatusRequest};
pub use shipment_response::{ErrorDetail, ErrorResponse, SuccessResponse};
