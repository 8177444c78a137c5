use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tonic::transport::{Channel, Endpoint};

use crate::domain::ports::DiscountResolver;
use crate::proto::discount_client::DiscountClient;
use crate::proto::GetDiscountRequest;

/// Discount applied whenever the discount service cannot answer.
pub const FALLBACK_DISCOUNT: f32 = 0.0;

#[derive(Debug, Error)]
pub enum DiscountError {
    #[error("Invalid discount service address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("Discount service unavailable: {0}")]
    Unavailable(String),
    #[error("Discount service did not answer within {0:?}")]
    DeadlineExceeded(Duration),
    #[error("Discount {0} is outside [0, 1]")]
    OutOfRange(f32),
}

// ── gRPC resolver ─────────────────────────────────────────────────────────────

/// Asks the remote discount service for every product, bounded by `deadline`.
///
/// Any failure, including an expired deadline, yields [`FALLBACK_DISCOUNT`].
/// Nothing is retried.
#[derive(Debug, Clone)]
pub struct GrpcDiscountResolver {
    client: DiscountClient<Channel>,
    deadline: Duration,
}

impl GrpcDiscountResolver {
    /// Builds a client for `address` (`host:port` or a full `http://` URI).
    /// The connection is only attempted on the first request, so an
    /// unreachable service does not prevent startup.
    pub fn connect_lazy(address: &str, deadline: Duration) -> Result<Self, DiscountError> {
        let uri = if address.contains("://") {
            address.to_string()
        } else {
            format!("http://{address}")
        };
        let endpoint = Endpoint::from_shared(uri).map_err(|e| DiscountError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client: DiscountClient::new(endpoint.connect_timeout(deadline).connect_lazy()),
            deadline,
        })
    }

    async fn request_discount(&self, product_id: i32) -> Result<f32, DiscountError> {
        let mut client = self.client.clone();
        let mut request = tonic::Request::new(GetDiscountRequest { product_id });
        request.set_timeout(self.deadline);

        let response = tokio::time::timeout(self.deadline, client.get_discount(request))
            .await
            .map_err(|_| DiscountError::DeadlineExceeded(self.deadline))?
            .map_err(|status| DiscountError::Unavailable(status.to_string()))?;

        let percentage = response.into_inner().percentage;
        if (0.0..=1.0).contains(&percentage) {
            Ok(percentage)
        } else {
            Err(DiscountError::OutOfRange(percentage))
        }
    }
}

#[async_trait]
impl DiscountResolver for GrpcDiscountResolver {
    async fn get_discount(&self, product_id: i32) -> f32 {
        match self.request_discount(product_id).await {
            Ok(discount) => {
                log::debug!("Discount={:.2} received for product={}", discount, product_id);
                discount
            }
            Err(e) => {
                log::warn!(
                    "Failed to get discount for product={}, returning discount={:.2}: {}",
                    product_id,
                    FALLBACK_DISCOUNT,
                    e
                );
                FALLBACK_DISCOUNT
            }
        }
    }
}

// ── Fixed resolver ────────────────────────────────────────────────────────────

/// Applies the same fraction to every product.
#[derive(Debug, Clone, Copy)]
pub struct FlatDiscount {
    fraction: f32,
}

impl FlatDiscount {
    /// Out-of-range or NaN fractions fall back to [`FALLBACK_DISCOUNT`].
    pub fn new(fraction: f32) -> Self {
        let fraction = if (0.0..=1.0).contains(&fraction) {
            fraction
        } else {
            FALLBACK_DISCOUNT
        };
        Self { fraction }
    }
}

#[async_trait]
impl DiscountResolver for FlatDiscount {
    async fn get_discount(&self, _product_id: i32) -> f32 {
        self.fraction
    }
}

#[cfg(test)]
mod tests {
    use tokio_stream::wrappers::TcpListenerStream;
    use tonic::{Request, Response, Status};

    use super::*;
    use crate::proto::discount_server::{Discount, DiscountServer};
    use crate::proto::GetDiscountResponse;

    /// Answers `product_id / 100` as the percentage; negative ids are unknown.
    struct PercentOfProductId;

    #[tonic::async_trait]
    impl Discount for PercentOfProductId {
        async fn get_discount(
            &self,
            request: Request<GetDiscountRequest>,
        ) -> Result<Response<GetDiscountResponse>, Status> {
            let product_id = request.into_inner().product_id;
            if product_id < 0 {
                return Err(Status::not_found(format!("product={} not found", product_id)));
            }
            Ok(Response::new(GetDiscountResponse {
                percentage: product_id as f32 / 100.0,
            }))
        }
    }

    async fn start_discount_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind failed");
        let address = listener.local_addr().expect("addr failed").to_string();
        tokio::spawn(
            tonic::transport::Server::builder()
                .add_service(DiscountServer::new(PercentOfProductId))
                .serve_with_incoming(TcpListenerStream::new(listener)),
        );
        address
    }

    #[tokio::test]
    async fn returns_percentage_answered_by_service() {
        let address = start_discount_server().await;
        let resolver = GrpcDiscountResolver::connect_lazy(&address, Duration::from_secs(2))
            .expect("valid address");

        assert_eq!(resolver.get_discount(25).await, 0.25);
        assert_eq!(resolver.get_discount(35).await, 0.35);
        assert_eq!(resolver.get_discount(0).await, 0.0);
    }

    #[tokio::test]
    async fn out_of_range_answer_falls_back_to_zero() {
        let address = start_discount_server().await;
        let resolver = GrpcDiscountResolver::connect_lazy(&address, Duration::from_secs(2))
            .expect("valid address");

        assert_eq!(resolver.get_discount(150).await, FALLBACK_DISCOUNT);
        // The channel stays usable after a rejected answer.
        assert_eq!(resolver.get_discount(10).await, 0.1);
    }

    #[tokio::test]
    async fn error_status_falls_back_to_zero() {
        let address = start_discount_server().await;
        let resolver = GrpcDiscountResolver::connect_lazy(&address, Duration::from_secs(2))
            .expect("valid address");

        assert_eq!(resolver.get_discount(-1).await, FALLBACK_DISCOUNT);
    }

    #[test]
    fn connect_lazy_rejects_malformed_address() {
        let err = GrpcDiscountResolver::connect_lazy("not a host:50051", Duration::from_millis(50))
            .unwrap_err();
        assert!(matches!(err, DiscountError::InvalidAddress { .. }));
    }

    #[tokio::test]
    async fn unreachable_service_falls_back_to_zero() {
        let resolver =
            GrpcDiscountResolver::connect_lazy("127.0.0.1:1", Duration::from_millis(300))
                .expect("valid address");

        assert_eq!(resolver.get_discount(1).await, FALLBACK_DISCOUNT);
    }

    #[tokio::test]
    async fn silent_service_falls_back_to_zero_after_deadline() {
        // Accepts TCP connections but never speaks HTTP/2.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind failed");
        let address = listener.local_addr().expect("addr failed").to_string();
        let deadline = Duration::from_millis(200);
        let resolver = GrpcDiscountResolver::connect_lazy(&address, deadline).expect("valid address");

        let started = tokio::time::Instant::now();
        let discount = resolver.get_discount(7).await;

        assert_eq!(discount, FALLBACK_DISCOUNT);
        assert!(started.elapsed() < deadline * 10);
        drop(listener);
    }

    #[tokio::test]
    async fn flat_discount_returns_configured_fraction() {
        let resolver = FlatDiscount::new(0.25);
        assert_eq!(resolver.get_discount(1).await, 0.25);
        assert_eq!(resolver.get_discount(999).await, 0.25);
    }

    #[tokio::test]
    async fn flat_discount_rejects_out_of_range_fraction() {
        assert_eq!(FlatDiscount::new(1.5).get_discount(1).await, FALLBACK_DISCOUNT);
        assert_eq!(FlatDiscount::new(-0.1).get_discount(1).await, FALLBACK_DISCOUNT);
        assert_eq!(FlatDiscount::new(f32::NAN).get_discount(1).await, FALLBACK_DISCOUNT);
    }
}
