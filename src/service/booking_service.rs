use std::sync::Arc;

use async_trait::async_trait;
use bson::{doc, Document};
use tracing::{error, info, instrument};
use validator::Validate;

use crate::dto::booking_dto::{
    BookingListQuery, CreateBookingRequest, CreateRestaurantBookingRequest, UpdateBookingRequest,
    UpdateRestaurantBookingRequest,
};
use crate::dto::{extension_document, set_document};
use crate::model::booking::{Booking, BookingStatus};
use crate::model::restaurant_booking::RestaurantBooking;
use crate::repository::crud_repo::CrudRepository;
use crate::repository::document_store::DocumentStore;
use crate::util::date;
use crate::util::error::ServiceError;
use crate::util::identifier::object_id_filter;

pub const BOOKINGS_COLLECTION: &str = "bookings";
pub const RESTAURANT_BOOKINGS_COLLECTION: &str = "restaurant_bookings";

#[async_trait]
pub trait BookingService: Send + Sync {
    // Room bookings
    async fn list_bookings(&self, query: BookingListQuery) -> Result<Vec<Document>, ServiceError>;
    async fn get_booking(&self, id: &str) -> Result<Document, ServiceError>;
    async fn create_booking(&self, request: CreateBookingRequest) -> Result<Document, ServiceError>;
    async fn update_booking(&self, id: &str, request: UpdateBookingRequest) -> Result<Document, ServiceError>;
    async fn delete_booking(&self, id: &str) -> Result<(), ServiceError>;

    // Restaurant table bookings
    async fn list_restaurant_bookings(&self, query: BookingListQuery) -> Result<Vec<RestaurantBooking>, ServiceError>;
    async fn get_restaurant_booking(&self, id: &str) -> Result<RestaurantBooking, ServiceError>;
    async fn create_restaurant_booking(&self, request: CreateRestaurantBookingRequest) -> Result<RestaurantBooking, ServiceError>;
    async fn update_restaurant_booking(&self, id: &str, request: UpdateRestaurantBookingRequest) -> Result<(), ServiceError>;
    async fn delete_restaurant_booking(&self, id: &str) -> Result<(), ServiceError>;
}

pub struct BookingServiceImpl {
    /// Raw documents: guests' extra form fields are stored alongside the core
    pub booking_repo: CrudRepository<Document>,
    pub restaurant_booking_repo: CrudRepository<RestaurantBooking>,
}

impl BookingServiceImpl {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        BookingServiceImpl {
            booking_repo: CrudRepository::new(store.clone(), BOOKINGS_COLLECTION, "Booking"),
            restaurant_booking_repo: CrudRepository::new(store, RESTAURANT_BOOKINGS_COLLECTION, "Restaurant booking"),
        }
    }

    fn status_filter(query: &BookingListQuery) -> Document {
        match query.status {
            Some(status) => doc! { "status": status.as_str() },
            None => Document::new(),
        }
    }

    fn parse_date(raw: &str) -> Result<bson::DateTime, ServiceError> {
        date::parse_iso_date(raw).ok_or_else(|| ServiceError::InvalidInput(format!("Invalid date: {}", raw)))
    }
}

fn booking_key(id: &str) -> Result<Document, ServiceError> {
    object_id_filter(id).ok_or_else(|| ServiceError::NotFound("Booking not found".to_string()))
}

fn restaurant_booking_key(id: &str) -> Result<Document, ServiceError> {
    object_id_filter(id).ok_or_else(|| ServiceError::NotFound("Restaurant booking not found".to_string()))
}

#[async_trait]
impl BookingService for BookingServiceImpl {
    #[instrument(skip(self))]
    async fn list_bookings(&self, query: BookingListQuery) -> Result<Vec<Document>, ServiceError> {
        let filter = Self::status_filter(&query);
        Ok(self.booking_repo.list(filter, Some(doc! { "createdAt": -1 })).await?)
    }

    #[instrument(skip(self))]
    async fn get_booking(&self, id: &str) -> Result<Document, ServiceError> {
        Ok(self.booking_repo.get(booking_key(id)?).await?)
    }

    #[instrument(skip(self, request), fields(room_id = %request.room_id))]
    async fn create_booking(&self, request: CreateBookingRequest) -> Result<Document, ServiceError> {
        request.validate()?;
        info!("Registering room booking");

        let mut extra = extension_document(&request.extra)?;
        // status is only ever set by staff through an update
        extra.remove("status");

        let now = date::now();
        let booking = Booking {
            id: None,
            room_id: request.room_id,
            room_name: request.room_name.unwrap_or_default(),
            first_name: request.first_name,
            last_name: request.last_name.unwrap_or_default(),
            email: request.email,
            phone: request.phone.unwrap_or_default(),
            check_in: request.check_in,
            check_out: request.check_out,
            guests: request.guests,
            selected_addons: request.selected_addons.unwrap_or_default(),
            total_amount: request.total_amount,
            special_requests: request.special_requests,
            status: BookingStatus::Pending,
            created_at: Some(now),
            updated_at: Some(now),
            extra,
        };
        let document = bson::to_document(&booking)
            .map_err(|e| ServiceError::InternalError(format!("Failed to serialize booking: {}", e)))?;

        let res = self.booking_repo.create(&document).await;
        match &res {
            Ok(_) => info!("Room booking registered"),
            Err(e) => error!("Failed to register room booking: {e}"),
        }
        Ok(res?)
    }

    #[instrument(skip(self, request))]
    async fn update_booking(&self, id: &str, request: UpdateBookingRequest) -> Result<Document, ServiceError> {
        request.validate()?;
        let filter = booking_key(id)?;
        Ok(self.booking_repo.update(filter, set_document(&request)?).await?)
    }

    #[instrument(skip(self))]
    async fn delete_booking(&self, id: &str) -> Result<(), ServiceError> {
        Ok(self.booking_repo.delete(booking_key(id)?).await?)
    }

    #[instrument(skip(self))]
    async fn list_restaurant_bookings(&self, query: BookingListQuery) -> Result<Vec<RestaurantBooking>, ServiceError> {
        let filter = Self::status_filter(&query);
        Ok(self.restaurant_booking_repo.list(filter, Some(doc! { "createdAt": -1 })).await?)
    }

    #[instrument(skip(self))]
    async fn get_restaurant_booking(&self, id: &str) -> Result<RestaurantBooking, ServiceError> {
        Ok(self.restaurant_booking_repo.get(restaurant_booking_key(id)?).await?)
    }

    #[instrument(skip(self, request), fields(restaurant_id = %request.restaurant_id))]
    async fn create_restaurant_booking(&self, request: CreateRestaurantBookingRequest) -> Result<RestaurantBooking, ServiceError> {
        request.validate()?;
        let booking_date = Self::parse_date(&request.date)?;

        let now = date::now();
        let booking = RestaurantBooking {
            id: None,
            restaurant_id: request.restaurant_id,
            restaurant_name: request.restaurant_name,
            restaurant_slug: request.restaurant_slug,
            name: request.name,
            email: request.email,
            phone: request.phone,
            date: Some(booking_date),
            time: request.time,
            guests: request.guests.unwrap_or(1),
            special_requests: request.special_requests,
            status: BookingStatus::Pending,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created = self.restaurant_booking_repo.create(&booking).await?;
        info!("Restaurant booking registered");
        Ok(created)
    }

    #[instrument(skip(self, request))]
    async fn update_restaurant_booking(&self, id: &str, request: UpdateRestaurantBookingRequest) -> Result<(), ServiceError> {
        request.validate()?;
        let filter = restaurant_booking_key(id)?;
        let mut set = set_document(&request)?;
        if let Some(raw) = &request.date {
            set.insert("date", Self::parse_date(raw)?);
        }
        self.restaurant_booking_repo.update(filter, set).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_restaurant_booking(&self, id: &str) -> Result<(), ServiceError> {
        Ok(self.restaurant_booking_repo.delete(restaurant_booking_key(id)?).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory_store::InMemoryDocumentStore;
    use serde_json::json;

    fn service() -> BookingServiceImpl {
        BookingServiceImpl::new(Arc::new(InMemoryDocumentStore::new()))
    }

    #[tokio::test]
    async fn test_booking_defaults_to_pending_and_keeps_extras() {
        let request: CreateBookingRequest = serde_json::from_value(json!({
            "roomId": "3", "firstName": "Arjun", "email": "arjun@example.com", "arrivalNote": "late"
        }))
        .unwrap();
        let booking = service().create_booking(request).await.unwrap();
        assert_eq!(booking.get_str("status").unwrap(), "pending");
        assert_eq!(booking.get_str("arrivalNote").unwrap(), "late");
    }

    #[tokio::test]
    async fn test_restaurant_booking_stores_a_date() {
        let service = service();
        let request: CreateRestaurantBookingRequest = serde_json::from_value(json!({
            "restaurantId": "1", "restaurantName": "Urban Dhaba", "restaurantSlug": "urban-dhaba",
            "name": "Meera", "email": "meera@example.com", "phone": "98200",
            "date": "2024-03-01", "time": "19:30", "guests": 4
        }))
        .unwrap();
        let booking = service.create_restaurant_booking(request).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.date.unwrap().try_to_rfc3339_string().unwrap(), "2024-03-01T00:00:00Z");

        let id = booking.id.unwrap().to_hex();
        let update: UpdateRestaurantBookingRequest = serde_json::from_value(json!({ "status": "confirmed" })).unwrap();
        service.update_restaurant_booking(&id, update).await.unwrap();
        let stored = service.get_restaurant_booking(&id).await.unwrap();
        assert_eq!(stored.status, BookingStatus::Confirmed);
        assert_eq!(stored.guests, 4);
    }

    #[tokio::test]
    async fn test_invalid_date_is_rejected() {
        let request: CreateRestaurantBookingRequest = serde_json::from_value(json!({
            "restaurantId": "1", "name": "Meera", "email": "meera@example.com", "phone": "98200",
            "date": "tomorrow", "time": "19:30", "guests": 2
        }))
        .unwrap();
        assert!(matches!(service().create_restaurant_booking(request).await, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_client_cannot_choose_status_on_create() {
        let service = service();
        let request: CreateBookingRequest = serde_json::from_value(json!({
            "roomId": "3", "firstName": "A", "email": "a@example.com", "status": "confirmed"
        }))
        .unwrap();
        let booking = service.create_booking(request).await.unwrap();
        assert_eq!(booking.get_str("status").unwrap(), "pending");

        let request: CreateRestaurantBookingRequest = serde_json::from_value(json!({
            "restaurantId": "1", "name": "Meera", "email": "meera@example.com", "phone": "98200",
            "date": "2024-03-01", "time": "19:30", "guests": 2, "status": "confirmed"
        }))
        .unwrap();
        let booking = service.create_restaurant_booking(request).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let service = service();
        let mut ids = Vec::new();
        for _ in 0..2 {
            let request: CreateBookingRequest = serde_json::from_value(json!({
                "roomId": "3", "firstName": "A", "email": "a@example.com"
            }))
            .unwrap();
            let booking = service.create_booking(request).await.unwrap();
            ids.push(booking.get_object_id("_id").unwrap().to_hex());
        }
        let update = UpdateBookingRequest { status: Some(BookingStatus::Confirmed), ..Default::default() };
        service.update_booking(&ids[0], update).await.unwrap();

        let query = BookingListQuery { status: Some(BookingStatus::Confirmed) };
        assert_eq!(service.list_bookings(query).await.unwrap().len(), 1);
        let query = BookingListQuery { status: Some(BookingStatus::Pending) };
        assert_eq!(service.list_bookings(query).await.unwrap().len(), 1);
    }
}
