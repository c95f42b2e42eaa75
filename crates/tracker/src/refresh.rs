use base::entities::Order;
use base::errors::TrackerError;
use base::status_api::StatusApi;

pub const DEFAULT_MAX_REFRESH_WORKERS: usize = 4;

/// Refreshes every order, fetching with at most `max_workers` threads at a time.
///
/// Returns once every fetch has resolved. Each worker owns a contiguous chunk of
/// the orders, so the order of the slice is kept.
pub fn refresh_orders<A>(
    orders: &mut [Order],
    status_api: &A,
    max_workers: usize,
) -> Result<(), TrackerError>
where
    A: StatusApi + Sync + ?Sized,
{
    if orders.is_empty() {
        return Ok(());
    }

    let number_of_workers = max_workers.clamp(1, orders.len());
    let chunk_size = (orders.len() + number_of_workers - 1) / number_of_workers;

    log::debug!(
        "refreshing {} orders with {} workers",
        orders.len(),
        number_of_workers
    );

    let chunks: Vec<&mut [Order]> = orders.chunks_mut(chunk_size).collect();

    crossbeam::scope(|scope| {
        for chunk in chunks {
            scope.spawn(move |_| {
                for order in chunk.iter_mut() {
                    order.refresh(status_api);
                }
            });
        }
    })
    .map_err(|_| TrackerError::RefreshAborted(String::from("a refresh worker panicked")))
}
