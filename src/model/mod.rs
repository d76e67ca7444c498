/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
/// HTTP transport towards the market data provider
pub mod http;
/// Provider request parameters and URL building
pub mod requests;
/// Provider response envelopes
pub mod responses;
/// Fixed-backoff retry used for store initialization
pub mod retry;
